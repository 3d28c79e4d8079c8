//! Table contents.

use fgl_ir::{LanguageVersion as V, VersionWindow};

use super::{
    BuiltinFunction as F, ClassMethod as M, CollectionMethod as C, ProgramRegister, Receiver,
    SystemClass, SystemConstant, SystemMacro, SystemPackage,
};

/// System functions.
pub static FUNCTIONS: &[F] = &[
    F::new("arg_val", 1, "Returns the command-line argument at the given position."),
    F::new("arr_count", 1, "Returns the number of rows in the current program array."),
    F::new("arr_curr", 1, "Returns the current row of the current program array."),
    F::new("downshift", 1, "Returns the string converted to lowercase."),
    F::new("err_get", 1, "Returns the message text of an error number."),
    F::new("err_print", 0, "Displays the message of an error number on the error line."),
    F::new("err_quit", 0, "Displays the message of an error number and stops the program."),
    F::new("errorlog", 0, "Writes a line to the error log file."),
    F::new("fgl_buffertouched", 1, "Returns whether the input buffer of the current field changed."),
    F::new("fgl_db_driver_type", 1, "Returns the type of the current database driver."),
    F::new("fgl_dialog_getfieldname", 1, "Returns the name of the current field."),
    F::new("fgl_drawbox", 0, "Draws a box in the current window.").until(V::V2_50),
    F::new("fgl_getenv", 1, "Returns the value of an environment variable."),
    F::new("fgl_getkey", 1, "Waits for a key and returns its code."),
    F::new("fgl_getkeylabel", 1, "Returns the label of a function key.").until(V::V2_50),
    F::new("fgl_getpid", 1, "Returns the process id of the runtime."),
    F::new("fgl_getresource", 1, "Returns the value of a resource entry."),
    F::new("fgl_getversion", 1, "Returns the version string of the runtime."),
    F::new("fgl_keysetlabel", 0, "Sets the label of a function key.").until(V::V2_50),
    F::new("fgl_keyval", 1, "Returns the code of a named key."),
    F::new("fgl_lastkey", 1, "Returns the code of the last key pressed."),
    F::new("fgl_set_arr_curr", 0, "Moves to a row of the current program array."),
    F::new("fgl_setenv", 0, "Sets an environment variable."),
    F::new("fgl_settitle", 0, "Sets the title of the current window.").until(V::V2_50),
    F::new("fgl_system", 0, "Runs a shell command in the foreground."),
    F::new("fgl_width", 1, "Returns the display width of a string."),
    F::new("length", 1, "Returns the length of a string without trailing blanks."),
    F::new("num_args", 1, "Returns the number of command-line arguments."),
    F::new("ord", 1, "Returns the character code of the first character of a string."),
    F::new("scr_line", 1, "Returns the current line of the screen array."),
    F::new("set_count", 0, "Sets the number of rows of the program array for DISPLAY ARRAY."),
    F::new("showhelp", 0, "Displays a help message."),
    F::new("startlog", 0, "Opens the error log file."),
    F::new("upshift", 1, "Returns the string converted to uppercase."),
    F::new("fgl_getfile", 0, "Copies a file from the front end.").since(V::V2_40),
    F::new("fgl_putfile", 0, "Copies a file to the front end.").since(V::V2_40),
];

const CHANNEL: &[M] = &[
    M::class("create", 1, "Creates a channel object."),
    M::object("close", 0, "Closes the channel."),
    M::object("isEof", 1, "Returns whether the end of the input was reached."),
    M::object("openClientSocket", 0, "Opens a TCP client socket."),
    M::object("openFile", 0, "Opens a file."),
    M::object("openPipe", 0, "Opens a pipe to a subprocess."),
    M::object("read", 1, "Reads a delimited record into variables."),
    M::object("readLine", 1, "Reads one line of text."),
    M::object("setDelimiter", 0, "Sets the field delimiter for read and write."),
    M::object("write", 0, "Writes a delimited record."),
    M::object("writeLine", 0, "Writes one line of text."),
];

const STRING_BUFFER: &[M] = &[
    M::class("create", 1, "Creates a string buffer."),
    M::object("append", 0, "Appends a string."),
    M::object("clear", 0, "Empties the buffer."),
    M::object("equals", 1, "Compares the buffer with a string."),
    M::object("getCharAt", 1, "Returns the character at a position."),
    M::object("getIndexOf", 1, "Returns the position of a substring."),
    M::object("getLength", 1, "Returns the number of characters."),
    M::object("replace", 0, "Replaces occurrences of a substring."),
    M::object("subString", 1, "Returns a substring."),
    M::object("toLowerCase", 0, "Converts the buffer to lowercase."),
    M::object("toString", 1, "Returns the content as a string."),
    M::object("toUpperCase", 0, "Converts the buffer to uppercase."),
    M::object("trim", 0, "Removes leading and trailing blanks."),
];

const STRING_TOKENIZER: &[M] = &[
    M::class("create", 1, "Creates a tokenizer for a string and delimiters."),
    M::class("createExt", 1, "Creates a tokenizer with escape and null handling."),
    M::object("countTokens", 1, "Returns the number of remaining tokens."),
    M::object("hasMoreTokens", 1, "Returns whether tokens remain."),
    M::object("nextToken", 1, "Returns the next token."),
];

const TYPE_INFO: &[M] = &[
    M::class("create", 1, "Creates a DOM node describing a variable."),
    M::class("describe", 1, "Returns the type description of a variable.").since(V::V3_10),
];

const APPLICATION: &[M] = &[
    M::class("getArgument", 1, "Returns a command-line argument."),
    M::class("getArgumentCount", 1, "Returns the number of command-line arguments."),
    M::class("getFglDir", 1, "Returns the runtime installation directory."),
    M::class("getProgramDir", 1, "Returns the directory of the program."),
    M::class("getProgramName", 1, "Returns the name of the program."),
];

const BASE_CLASSES: &[SystemClass] = &[
    SystemClass::new("base", "Application", "Program-level information.", APPLICATION),
    SystemClass::new("base", "Channel", "Sequential file, pipe and socket I/O.", CHANNEL),
    SystemClass::new("base", "StringBuffer", "Mutable string.", STRING_BUFFER),
    SystemClass::new("base", "StringTokenizer", "Splits a string into tokens.", STRING_TOKENIZER),
    SystemClass::new("base", "TypeInfo", "Runtime type descriptions.", TYPE_INFO),
];

const INTERFACE: &[M] = &[
    M::class("frontCall", 0, "Calls a front-end function."),
    M::class("getDocument", 1, "Returns the user interface DOM document."),
    M::class("getFrontEndName", 1, "Returns the name of the front end."),
    M::class("getRootNode", 1, "Returns the root node of the user interface tree."),
    M::class("loadActionDefaults", 0, "Loads global action defaults."),
    M::class("loadStyles", 0, "Loads a presentation style file."),
    M::class("refresh", 0, "Synchronizes the front end."),
    M::class("setText", 0, "Sets the title of the application."),
];

const WINDOW: &[M] = &[
    M::class("forName", 1, "Returns the window with the given name."),
    M::class("getCurrent", 1, "Returns the current window."),
    M::object("createForm", 1, "Creates an empty form in the window."),
    M::object("findNode", 1, "Finds a node of the window by type and name."),
    M::object("getForm", 1, "Returns the form displayed in the window."),
    M::object("getNode", 1, "Returns the DOM node of the window."),
    M::object("getText", 1, "Returns the window title."),
    M::object("setText", 0, "Sets the window title."),
];

const FORM: &[M] = &[
    M::class("setDefaultInitializer", 0, "Sets the function called when a form loads."),
    M::object("findNode", 1, "Finds a node of the form by type and name."),
    M::object("getNode", 1, "Returns the DOM node of the form."),
    M::object("loadActionDefaults", 0, "Loads action defaults for the form."),
    M::object("setElementHidden", 0, "Hides or shows a form element."),
    M::object("setElementText", 0, "Sets the text of a form element."),
    M::object("setFieldHidden", 0, "Hides or shows a form field."),
];

const DIALOG: &[M] = &[
    M::class("getCurrent", 1, "Returns the current dialog."),
    M::class("setDefaultUnbuffered", 0, "Sets the default buffering mode of dialogs."),
    M::object("accept", 0, "Validates and leaves the dialog."),
    M::object("appendRow", 0, "Appends a row to a list."),
    M::object("cancel", 0, "Cancels the dialog."),
    M::object("deleteRow", 0, "Deletes a row of a list."),
    M::object("getArrayLength", 1, "Returns the number of rows of a list."),
    M::object("getCurrentRow", 1, "Returns the current row of a list."),
    M::object("getFieldValue", 1, "Returns the value of a field."),
    M::object("insertRow", 0, "Inserts a row into a list."),
    M::object("nextField", 0, "Moves to another field."),
    M::object("setActionActive", 0, "Enables or disables an action."),
    M::object("setActionHidden", 0, "Hides or shows an action."),
    M::object("setCurrentRow", 0, "Moves to a row of a list."),
    M::object("setFieldActive", 0, "Enables or disables a field."),
    M::object("setFieldValue", 0, "Sets the value of a field."),
];

const UI_CLASSES: &[SystemClass] = &[
    SystemClass::new("ui", "Dialog", "Running dialog control.", DIALOG),
    SystemClass::new("ui", "Form", "Form control.", FORM),
    SystemClass::new("ui", "Interface", "Front-end control.", INTERFACE),
    SystemClass::new("ui", "Window", "Window control.", WINDOW),
];

const JSON: &[M] = &[
    M::class("format", 1, "Indents a JSON string."),
    M::class("parse", 0, "Fills a variable from a JSON string."),
    M::class("proposeType", 1, "Proposes a type definition for a JSON string.").since(V::V3_10),
    M::class("stringify", 1, "Serializes a variable to JSON."),
];

const JSON_OBJECT: &[M] = &[
    M::class("create", 1, "Creates an empty JSON object."),
    M::class("fromFGL", 1, "Creates a JSON object from a record."),
    M::class("parse", 1, "Parses a JSON object string."),
    M::object("get", 1, "Returns the value of a member."),
    M::object("getLength", 1, "Returns the number of members."),
    M::object("getType", 1, "Returns the JSON type of a member."),
    M::object("has", 1, "Returns whether a member exists."),
    M::object("name", 1, "Returns the name of the member at a position."),
    M::object("put", 0, "Sets a member."),
    M::object("remove", 0, "Removes a member."),
    M::object("toFGL", 0, "Copies the object into a record."),
    M::object("toString", 1, "Serializes the object."),
];

const JSON_ARRAY: &[M] = &[
    M::class("create", 1, "Creates an empty JSON array."),
    M::class("fromFGL", 1, "Creates a JSON array from a program array."),
    M::class("parse", 1, "Parses a JSON array string."),
    M::object("get", 1, "Returns the element at a position."),
    M::object("getLength", 1, "Returns the number of elements."),
    M::object("getType", 1, "Returns the JSON type of an element."),
    M::object("put", 0, "Sets the element at a position."),
    M::object("remove", 0, "Removes the element at a position."),
    M::object("toFGL", 0, "Copies the array into a program array."),
    M::object("toString", 1, "Serializes the array."),
];

const STRINGS: &[M] = &[
    M::class("base64Decode", 1, "Decodes a Base64 string."),
    M::class("base64Encode", 1, "Encodes a string in Base64."),
    M::class("urlDecode", 1, "Decodes a URL-encoded string."),
    M::class("urlEncode", 1, "URL-encodes a string."),
];

const MATH: &[M] = &[
    M::class("pi", 1, "Returns pi."),
    M::class("pow", 1, "Raises a number to a power."),
    M::class("rand", 1, "Returns a random integer."),
    M::class("sqrt", 1, "Returns the square root."),
    M::class("srand", 0, "Seeds the random generator."),
];

const UTIL_CLASSES: &[SystemClass] = &[
    SystemClass::new("util", "JSON", "JSON serialization of program variables.", JSON),
    SystemClass::new("util", "JSONArray", "JSON array value.", JSON_ARRAY).since(V::V3_00),
    SystemClass::new("util", "JSONObject", "JSON object value.", JSON_OBJECT),
    SystemClass::new("util", "Math", "Mathematical functions.", MATH),
    SystemClass::new("util", "Strings", "String encoding functions.", STRINGS).since(V::V3_20),
];

const PATH: &[M] = &[
    M::class("baseName", 1, "Returns the last element of a path."),
    M::class("copy", 1, "Copies a file."),
    M::class("delete", 1, "Deletes a file or empty directory."),
    M::class("dirClose", 0, "Closes a directory handle."),
    M::class("dirName", 1, "Returns the directory part of a path."),
    M::class("dirNext", 1, "Returns the next entry of a directory handle."),
    M::class("dirOpen", 1, "Opens a directory for reading."),
    M::class("exists", 1, "Returns whether a file exists."),
    M::class("extension", 1, "Returns the file extension."),
    M::class("homeDir", 1, "Returns the home directory."),
    M::class("isDirectory", 1, "Returns whether a path is a directory."),
    M::class("isFile", 1, "Returns whether a path is a regular file."),
    M::class("join", 1, "Joins two path elements."),
    M::class("mkdir", 1, "Creates a directory."),
    M::class("pwd", 1, "Returns the working directory."),
    M::class("rename", 1, "Renames a file."),
    M::class("separator", 1, "Returns the path separator."),
    M::class("size", 1, "Returns the size of a file."),
];

const OS_CLASSES: &[SystemClass] = &[SystemClass::new(
    "os",
    "Path",
    "File system paths and directories.",
    PATH,
)];

const WEB_SERVICE_ENGINE: &[M] = &[
    M::class("ProcessServices", 1, "Processes incoming service requests."),
    M::class("RegisterRestService", 0, "Registers a REST service module.").since(V::V3_10),
    M::class("Start", 0, "Starts the service engine."),
];

const HTTP_REQUEST: &[M] = &[
    M::class("Create", 1, "Creates an HTTP request for a URL."),
    M::object("doRequest", 0, "Sends the request without a body."),
    M::object("doTextRequest", 0, "Sends the request with a text body."),
    M::object("getResponse", 1, "Waits for and returns the response."),
    M::object("setHeader", 0, "Sets a request header."),
    M::object("setMethod", 0, "Sets the HTTP method."),
];

const HTTP_RESPONSE: &[M] = &[
    M::object("getHeader", 1, "Returns a response header."),
    M::object("getStatusCode", 1, "Returns the HTTP status code."),
    M::object("getTextResponse", 1, "Returns the body as text."),
];

const COM_CLASSES: &[SystemClass] = &[
    SystemClass::new("com", "HTTPRequest", "HTTP client request.", HTTP_REQUEST),
    SystemClass::new("com", "HTTPResponse", "HTTP client response.", HTTP_RESPONSE),
    SystemClass::new("com", "WebServiceEngine", "Web service server.", WEB_SERVICE_ENGINE),
];

/// Packages of system classes.
pub static PACKAGES: &[SystemPackage] = &[
    SystemPackage {
        name: "base",
        doc: "Core runtime classes.",
        classes: BASE_CLASSES,
        implicit: true,
        window: VersionWindow::ALL,
    },
    SystemPackage {
        name: "ui",
        doc: "User interface classes.",
        classes: UI_CLASSES,
        implicit: true,
        window: VersionWindow::ALL,
    },
    SystemPackage {
        name: "util",
        doc: "Utility extension module.",
        classes: UTIL_CLASSES,
        implicit: false,
        window: VersionWindow::ALL,
    },
    SystemPackage {
        name: "os",
        doc: "Operating system extension module.",
        classes: OS_CLASSES,
        implicit: false,
        window: VersionWindow::ALL,
    },
    SystemPackage {
        name: "com",
        doc: "Web services extension module.",
        classes: COM_CLASSES,
        implicit: false,
        window: VersionWindow::ALL,
    },
];

pub static CONSTANTS: &[SystemConstant] = &[
    SystemConstant {
        name: "FALSE",
        doc: "Boolean false (0).",
        window: VersionWindow::ALL,
    },
    SystemConstant {
        name: "NOTFOUND",
        doc: "SQL code for no row found (100).",
        window: VersionWindow::ALL,
    },
    SystemConstant {
        name: "TRUE",
        doc: "Boolean true (1).",
        window: VersionWindow::ALL,
    },
];

pub static MACROS: &[SystemMacro] = &[
    SystemMacro {
        name: "__FILE__",
        doc: "Name of the current source file.",
        window: VersionWindow::ALL,
    },
    SystemMacro {
        name: "__FUNCTION__",
        doc: "Name of the current function.",
        window: VersionWindow::since(V::V3_00),
    },
    SystemMacro {
        name: "__LINE__",
        doc: "Current source line number.",
        window: VersionWindow::ALL,
    },
];

const SQLCA: &[ProgramRegister] = &[
    ProgramRegister::leaf("sqlawarn", "SQL warning flags."),
    ProgramRegister::leaf("sqlcode", "SQL status code of the last statement."),
    ProgramRegister::leaf("sqlerrd", "SQL diagnostic integers; sqlerrd[3] is the processed row count."),
    ProgramRegister::leaf("sqlerrm", "SQL error message parameter."),
    ProgramRegister::leaf("sqlerrp", "SQL error routine name."),
];

const TOP_REGISTERS: &[ProgramRegister] = &[
    ProgramRegister::leaf("int_flag", "Set when the user interrupts."),
    ProgramRegister::leaf("quit_flag", "Set when the user sends a quit signal."),
    ProgramRegister {
        name: "sqlca",
        doc: "SQL communication area.",
        children: SQLCA,
        window: VersionWindow::ALL,
    },
    ProgramRegister::leaf("sqlerrmessage", "Message of the last SQL error."),
    ProgramRegister::leaf("sqlstate", "SQLSTATE code of the last SQL statement."),
    ProgramRegister::leaf("status", "Status code of the last statement."),
];

/// Root of the program register tree. It has no name of its own.
pub static PROGRAM_REGISTERS: ProgramRegister = ProgramRegister {
    name: "",
    doc: "Program registers.",
    children: TOP_REGISTERS,
    window: VersionWindow::ALL,
};

pub static COLLECTION_METHODS: &[C] = &[
    C::new(Receiver::Array, "appendElement", 0, "Adds an element at the end."),
    C::new(Receiver::Array, "clear", 0, "Removes all elements."),
    C::new(Receiver::Array, "copyTo", 0, "Copies the elements to another array.").since(V::V3_10),
    C::new(Receiver::Array, "deleteElement", 0, "Removes the element at a position."),
    C::new(Receiver::Array, "getLength", 1, "Returns the number of elements."),
    C::new(Receiver::Array, "insertElement", 0, "Inserts an element at a position."),
    C::new(Receiver::Array, "search", 1, "Returns the position of a value.").since(V::V3_20),
    C::new(Receiver::Array, "sort", 0, "Sorts the elements by a member.").since(V::V3_20),
    C::new(Receiver::Dictionary, "clear", 0, "Removes all entries."),
    C::new(Receiver::Dictionary, "contains", 1, "Returns whether a key exists."),
    C::new(Receiver::Dictionary, "copyTo", 0, "Copies the entries to another dictionary.")
        .since(V::V3_20),
    C::new(Receiver::Dictionary, "getKeys", 1, "Returns the keys as a dynamic array."),
    C::new(Receiver::Dictionary, "getLength", 1, "Returns the number of entries."),
    C::new(Receiver::Dictionary, "remove", 0, "Removes the entry for a key."),
    C::new(Receiver::String, "append", 1, "Returns the string with another appended."),
    C::new(Receiver::String, "equals", 1, "Compares with another string."),
    C::new(Receiver::String, "equalsIgnoreCase", 1, "Compares ignoring case."),
    C::new(Receiver::String, "getCharAt", 1, "Returns the character at a position."),
    C::new(Receiver::String, "getIndexOf", 1, "Returns the position of a substring."),
    C::new(Receiver::String, "getLength", 1, "Returns the number of characters."),
    C::new(Receiver::String, "matches", 1, "Tests against a regular expression.").since(V::V3_20),
    C::new(Receiver::String, "replaceAll", 1, "Replaces every regular expression match.")
        .since(V::V3_20),
    C::new(Receiver::String, "subString", 1, "Returns a substring."),
    C::new(Receiver::String, "toLowerCase", 1, "Returns the string in lowercase."),
    C::new(Receiver::String, "toUpperCase", 1, "Returns the string in uppercase."),
    C::new(Receiver::String, "trim", 1, "Removes leading and trailing blanks."),
    C::new(Receiver::String, "trimLeft", 1, "Removes leading blanks."),
    C::new(Receiver::String, "trimRight", 1, "Removes trailing blanks."),
];
