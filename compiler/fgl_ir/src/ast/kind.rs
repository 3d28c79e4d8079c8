//! Node kinds.
//!
//! One variant per grammar construct, carrying only the fields that
//! construct has. Sub-nodes are `NodeId`s into the owning `Ast`; a missing
//! required sub-node is `None` (the parser already reported it).

use smallvec::SmallVec;

use super::NodeId;
use crate::Ident;

/// Visibility modifier on module-level declarations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Access {
    #[default]
    Default,
    Public,
    Private,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// `IMPORT util`: a built-in extension module.
    Builtin,
    /// `IMPORT FGL module`
    Fgl,
    /// `IMPORT JAVA java.util.Date`
    Java,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Function,
    Report,
}

/// Construct named by `EXIT x` / `CONTINUE x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LoopKind {
    While,
    For,
    Foreach,
    Case,
    Menu,
    Program,
}

impl LoopKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            LoopKind::While => "WHILE",
            LoopKind::For => "FOR",
            LoopKind::Foreach => "FOREACH",
            LoopKind::Case => "CASE",
            LoopKind::Menu => "MENU",
            LoopKind::Program => "PROGRAM",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MenuOptionKind {
    /// `COMMAND "name"`
    Command,
    /// `ON ACTION name`
    Action,
    /// `BEFORE MENU`
    BeforeMenu,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum FetchDirection {
    #[default]
    Next,
    Previous,
    First,
    Last,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WheneverCondition {
    Error,
    AnyError,
    Warning,
    NotFound,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WheneverAction {
    Continue,
    Stop,
    Call(Ident),
    Goto(Ident),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeferKind {
    Interrupt,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SqlVerb {
    Select,
    Insert,
    Update,
    Delete,
}

/// Where a `DECLARE ... CURSOR` gets its statement from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CursorSource {
    /// `FOR stmt_id` naming a prepared statement.
    Prepared(Ident),
    /// `FOR SELECT ...`
    Sql(NodeId),
    /// `FROM expr`
    Expr(NodeId),
    /// Recovery left the source out.
    Missing,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Decimal,
    String,
    Null,
    True,
    False,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
    Matches,
    NotMatches,
    Concat,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "OR",
            BinaryOp::And => "AND",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Like => "LIKE",
            BinaryOp::NotLike => "NOT LIKE",
            BinaryOp::Matches => "MATCHES",
            BinaryOp::NotMatches => "NOT MATCHES",
            BinaryOp::Concat => "||",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "MOD",
            BinaryOp::Pow => "**",
        }
    }
}

/// One step after the base identifier of a name expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NameSuffix {
    /// `.member`
    Member(Ident),
    /// `[i]` or `[i, j]`
    Index(Vec<NodeId>),
    /// `.*`
    AllMembers,
    /// `(args)`
    Call(Vec<NodeId>),
}

/// Built-in scalar types. Spelling variants (`INT`, `DEC`, `REAL`, ...) map
/// onto one kind; the spelling itself is kept as verbatim-names trivia.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Integer,
    SmallInt,
    BigInt,
    TinyInt,
    Decimal,
    Money,
    Float,
    SmallFloat,
    Char,
    VarChar,
    String,
    Date,
    DateTime,
    Interval,
    Boolean,
    Text,
    Byte,
}

impl ScalarKind {
    /// Map a type word to its kind.
    pub fn from_word(word: &str) -> Option<Self> {
        let kind = match word.to_ascii_uppercase().as_str() {
            "INTEGER" | "INT" => ScalarKind::Integer,
            "SMALLINT" => ScalarKind::SmallInt,
            "BIGINT" | "INT8" => ScalarKind::BigInt,
            "TINYINT" => ScalarKind::TinyInt,
            "DECIMAL" | "DEC" | "NUMERIC" => ScalarKind::Decimal,
            "MONEY" => ScalarKind::Money,
            "FLOAT" | "DOUBLE" => ScalarKind::Float,
            "SMALLFLOAT" | "REAL" => ScalarKind::SmallFloat,
            "CHAR" | "CHARACTER" => ScalarKind::Char,
            "VARCHAR" => ScalarKind::VarChar,
            "STRING" => ScalarKind::String,
            "DATE" => ScalarKind::Date,
            "DATETIME" => ScalarKind::DateTime,
            "INTERVAL" => ScalarKind::Interval,
            "BOOLEAN" => ScalarKind::Boolean,
            "TEXT" => ScalarKind::Text,
            "BYTE" => ScalarKind::Byte,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical spelling.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::Integer => "INTEGER",
            ScalarKind::SmallInt => "SMALLINT",
            ScalarKind::BigInt => "BIGINT",
            ScalarKind::TinyInt => "TINYINT",
            ScalarKind::Decimal => "DECIMAL",
            ScalarKind::Money => "MONEY",
            ScalarKind::Float => "FLOAT",
            ScalarKind::SmallFloat => "SMALLFLOAT",
            ScalarKind::Char => "CHAR",
            ScalarKind::VarChar => "VARCHAR",
            ScalarKind::String => "STRING",
            ScalarKind::Date => "DATE",
            ScalarKind::DateTime => "DATETIME",
            ScalarKind::Interval => "INTERVAL",
            ScalarKind::Boolean => "BOOLEAN",
            ScalarKind::Text => "TEXT",
            ScalarKind::Byte => "BYTE",
        }
    }

    /// Types whose values carry string methods.
    pub const fn is_character(self) -> bool {
        matches!(
            self,
            ScalarKind::Char | ScalarKind::VarChar | ScalarKind::String | ScalarKind::Text
        )
    }
}

/// The construct-specific part of a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Module structure
    Module {
        items: Vec<NodeId>,
    },
    Import {
        kind: ImportKind,
        path: Vec<Ident>,
    },
    /// `SCHEMA name`; `DATABASE name` is the alt-form.
    Schema {
        name: Option<Ident>,
    },
    Globals {
        file: Option<Box<str>>,
        items: Vec<NodeId>,
    },
    Define {
        access: Access,
        vars: Vec<NodeId>,
    },
    VarDef {
        names: Vec<Ident>,
        ty: Option<NodeId>,
    },
    Constant {
        access: Access,
        defs: Vec<NodeId>,
    },
    ConstDef {
        name: Ident,
        ty: Option<NodeId>,
        value: Option<NodeId>,
    },
    TypeDecl {
        access: Access,
        defs: Vec<NodeId>,
    },
    TypeDef {
        name: Ident,
        ty: Option<NodeId>,
    },
    Main {
        body: Vec<NodeId>,
    },
    Function {
        access: Access,
        kind: FunctionKind,
        name: Option<Ident>,
        params: Vec<NodeId>,
        returns: Vec<NodeId>,
        body: Vec<NodeId>,
    },
    Param {
        name: Ident,
        ty: Option<NodeId>,
    },

    // Statements
    Let {
        target: Option<NodeId>,
        values: Vec<NodeId>,
    },
    Call {
        callee: Option<NodeId>,
        returning: Vec<NodeId>,
    },
    Return {
        values: Vec<NodeId>,
    },
    If {
        cond: Option<NodeId>,
        then_body: Vec<NodeId>,
        else_body: Vec<NodeId>,
    },
    While {
        cond: Option<NodeId>,
        body: Vec<NodeId>,
    },
    For {
        var: Option<NodeId>,
        start: Option<NodeId>,
        end: Option<NodeId>,
        step: Option<NodeId>,
        body: Vec<NodeId>,
    },
    Foreach {
        cursor: Option<Ident>,
        using: Vec<NodeId>,
        into: Vec<NodeId>,
        body: Vec<NodeId>,
    },
    Case {
        subject: Option<NodeId>,
        arms: Vec<NodeId>,
    },
    When {
        conds: Vec<NodeId>,
        body: Vec<NodeId>,
    },
    Otherwise {
        body: Vec<NodeId>,
    },
    Try {
        body: Vec<NodeId>,
        catch_body: Vec<NodeId>,
    },
    Menu {
        title: Option<NodeId>,
        options: Vec<NodeId>,
    },
    MenuOption {
        kind: MenuOptionKind,
        name: Option<NodeId>,
        body: Vec<NodeId>,
    },
    Exit {
        target: Option<LoopKind>,
        code: Option<NodeId>,
    },
    Continue {
        target: Option<LoopKind>,
    },
    Declare {
        cursor: Option<Ident>,
        scroll: bool,
        hold: bool,
        source: CursorSource,
    },
    Prepare {
        statement: Option<Ident>,
        from: Option<NodeId>,
    },
    Open {
        cursor: Option<Ident>,
        using: Vec<NodeId>,
    },
    Fetch {
        direction: FetchDirection,
        cursor: Option<Ident>,
        into: Vec<NodeId>,
    },
    Close {
        cursor: Option<Ident>,
    },
    Free {
        cursor: Option<Ident>,
    },
    Execute {
        statement: Option<Ident>,
        using: Vec<NodeId>,
        into: Vec<NodeId>,
    },
    ExecuteImmediate {
        sql: Option<NodeId>,
    },
    Display {
        values: Vec<NodeId>,
    },
    Message {
        values: Vec<NodeId>,
    },
    ErrorStmt {
        values: Vec<NodeId>,
    },
    Initialize {
        targets: Vec<NodeId>,
    },
    Whenever {
        condition: WheneverCondition,
        action: Option<WheneverAction>,
    },
    Sleep {
        seconds: Option<NodeId>,
    },
    Defer {
        kind: Option<DeferKind>,
    },
    Goto {
        label: Option<Ident>,
    },
    Label {
        name: Option<Ident>,
    },
    /// SQL pass-through; the statement text is the verbatim-image attribute.
    Sql {
        verb: SqlVerb,
        into: Vec<NodeId>,
    },

    // Expressions
    Literal {
        kind: LiteralKind,
        value: Box<str>,
    },
    Name {
        base: Ident,
        suffixes: Vec<NameSuffix>,
    },
    Unary {
        op: UnaryOp,
        operand: Option<NodeId>,
    },
    Binary {
        op: BinaryOp,
        lhs: NodeId,
        rhs: Option<NodeId>,
    },
    IsNull {
        operand: NodeId,
        negated: bool,
    },
    Paren {
        inner: Option<NodeId>,
    },
    Clipped {
        operand: NodeId,
    },
    Using {
        operand: NodeId,
        format: Option<NodeId>,
    },

    // Types
    ScalarType {
        kind: ScalarKind,
        /// Qualifier text such as `(10,2)` or `YEAR TO SECOND`.
        qualifier: Option<Box<str>>,
    },
    NamedType {
        path: Vec<Ident>,
    },
    RecordType {
        fields: Vec<NodeId>,
    },
    /// `LIKE tab.col`, or `RECORD LIKE tab.*` when `column` is `None`.
    LikeType {
        table: Option<Ident>,
        column: Option<Ident>,
    },
    ArrayType {
        dynamic: bool,
        /// Static bounds, or the `WITH DIMENSION` count for dynamic arrays.
        bounds: SmallVec<[u32; 3]>,
        element: Option<NodeId>,
    },
    DictionaryType {
        value: Option<NodeId>,
    },
    FunctionType {
        params: Vec<NodeId>,
        returns: Vec<NodeId>,
    },
}

fn push_opt(out: &mut SmallVec<[NodeId; 4]>, id: Option<NodeId>) {
    if let Some(id) = id {
        out.push(id);
    }
}

impl NodeKind {
    /// Every sub-node id this kind refers to, in field order.
    pub fn child_ids(&self) -> SmallVec<[NodeId; 4]> {
        let mut out = SmallVec::new();
        match self {
            NodeKind::Module { items }
            | NodeKind::Globals { items, .. }
            | NodeKind::Define { vars: items, .. }
            | NodeKind::Constant { defs: items, .. }
            | NodeKind::TypeDecl { defs: items, .. }
            | NodeKind::Main { body: items }
            | NodeKind::Return { values: items }
            | NodeKind::Otherwise { body: items }
            | NodeKind::Display { values: items }
            | NodeKind::Message { values: items }
            | NodeKind::ErrorStmt { values: items }
            | NodeKind::Initialize { targets: items }
            | NodeKind::Sql { into: items, .. }
            | NodeKind::RecordType { fields: items } => out.extend(items.iter().copied()),
            NodeKind::Function {
                params,
                returns,
                body,
                ..
            } => {
                out.extend(params.iter().copied());
                out.extend(returns.iter().copied());
                out.extend(body.iter().copied());
            }
            NodeKind::VarDef { ty, .. }
            | NodeKind::TypeDef { ty, .. }
            | NodeKind::Param { ty, .. } => push_opt(&mut out, *ty),
            NodeKind::ConstDef { ty, value, .. } => {
                push_opt(&mut out, *ty);
                push_opt(&mut out, *value);
            }
            NodeKind::Let { target, values } => {
                push_opt(&mut out, *target);
                out.extend(values.iter().copied());
            }
            NodeKind::Call { callee, returning } => {
                push_opt(&mut out, *callee);
                out.extend(returning.iter().copied());
            }
            NodeKind::If {
                cond,
                then_body,
                else_body,
            } => {
                push_opt(&mut out, *cond);
                out.extend(then_body.iter().copied());
                out.extend(else_body.iter().copied());
            }
            NodeKind::While { cond, body } => {
                push_opt(&mut out, *cond);
                out.extend(body.iter().copied());
            }
            NodeKind::For {
                var,
                start,
                end,
                step,
                body,
            } => {
                push_opt(&mut out, *var);
                push_opt(&mut out, *start);
                push_opt(&mut out, *end);
                push_opt(&mut out, *step);
                out.extend(body.iter().copied());
            }
            NodeKind::Foreach {
                using, into, body, ..
            } => {
                out.extend(using.iter().copied());
                out.extend(into.iter().copied());
                out.extend(body.iter().copied());
            }
            NodeKind::Case { subject, arms } => {
                push_opt(&mut out, *subject);
                out.extend(arms.iter().copied());
            }
            NodeKind::When { conds, body } => {
                out.extend(conds.iter().copied());
                out.extend(body.iter().copied());
            }
            NodeKind::Try { body, catch_body } => {
                out.extend(body.iter().copied());
                out.extend(catch_body.iter().copied());
            }
            NodeKind::Menu { title, options } => {
                push_opt(&mut out, *title);
                out.extend(options.iter().copied());
            }
            NodeKind::MenuOption { name, body, .. } => {
                push_opt(&mut out, *name);
                out.extend(body.iter().copied());
            }
            NodeKind::Exit { code, .. } => push_opt(&mut out, *code),
            NodeKind::Declare { source, .. } => match source {
                CursorSource::Sql(id) | CursorSource::Expr(id) => out.push(*id),
                CursorSource::Prepared(_) | CursorSource::Missing => {}
            },
            NodeKind::Prepare { from, .. } => push_opt(&mut out, *from),
            NodeKind::Open { using, .. } => out.extend(using.iter().copied()),
            NodeKind::Fetch { into, .. } => out.extend(into.iter().copied()),
            NodeKind::Execute { using, into, .. } => {
                out.extend(using.iter().copied());
                out.extend(into.iter().copied());
            }
            NodeKind::ExecuteImmediate { sql } => push_opt(&mut out, *sql),
            NodeKind::Sleep { seconds } => push_opt(&mut out, *seconds),
            NodeKind::Name { suffixes, .. } => {
                for suffix in suffixes {
                    if let NameSuffix::Index(ids) | NameSuffix::Call(ids) = suffix {
                        out.extend(ids.iter().copied());
                    }
                }
            }
            NodeKind::Unary { operand, .. } => push_opt(&mut out, *operand),
            NodeKind::Binary { lhs, rhs, .. } => {
                out.push(*lhs);
                push_opt(&mut out, *rhs);
            }
            NodeKind::IsNull { operand, .. } | NodeKind::Clipped { operand } => {
                out.push(*operand);
            }
            NodeKind::Paren { inner } => push_opt(&mut out, *inner),
            NodeKind::Using { operand, format } => {
                out.push(*operand);
                push_opt(&mut out, *format);
            }
            NodeKind::ArrayType { element, .. } => push_opt(&mut out, *element),
            NodeKind::DictionaryType { value } => push_opt(&mut out, *value),
            NodeKind::FunctionType { params, returns } => {
                out.extend(params.iter().copied());
                out.extend(returns.iter().copied());
            }
            NodeKind::Import { .. }
            | NodeKind::Schema { .. }
            | NodeKind::Continue { .. }
            | NodeKind::Close { .. }
            | NodeKind::Free { .. }
            | NodeKind::Whenever { .. }
            | NodeKind::Defer { .. }
            | NodeKind::Goto { .. }
            | NodeKind::Label { .. }
            | NodeKind::Literal { .. }
            | NodeKind::ScalarType { .. }
            | NodeKind::NamedType { .. }
            | NodeKind::LikeType { .. } => {}
        }
        out
    }

    /// Short construct name for logs and messages.
    pub const fn name(&self) -> &'static str {
        match self {
            NodeKind::Module { .. } => "module",
            NodeKind::Import { .. } => "IMPORT",
            NodeKind::Schema { .. } => "SCHEMA",
            NodeKind::Globals { .. } => "GLOBALS",
            NodeKind::Define { .. } => "DEFINE",
            NodeKind::VarDef { .. } => "variable definition",
            NodeKind::Constant { .. } => "CONSTANT",
            NodeKind::ConstDef { .. } => "constant definition",
            NodeKind::TypeDecl { .. } => "TYPE",
            NodeKind::TypeDef { .. } => "type definition",
            NodeKind::Main { .. } => "MAIN",
            NodeKind::Function {
                kind: FunctionKind::Function,
                ..
            } => "FUNCTION",
            NodeKind::Function {
                kind: FunctionKind::Report,
                ..
            } => "REPORT",
            NodeKind::Param { .. } => "parameter",
            NodeKind::Let { .. } => "LET",
            NodeKind::Call { .. } => "CALL",
            NodeKind::Return { .. } => "RETURN",
            NodeKind::If { .. } => "IF",
            NodeKind::While { .. } => "WHILE",
            NodeKind::For { .. } => "FOR",
            NodeKind::Foreach { .. } => "FOREACH",
            NodeKind::Case { .. } => "CASE",
            NodeKind::When { .. } => "WHEN",
            NodeKind::Otherwise { .. } => "OTHERWISE",
            NodeKind::Try { .. } => "TRY",
            NodeKind::Menu { .. } => "MENU",
            NodeKind::MenuOption { .. } => "menu option",
            NodeKind::Exit { .. } => "EXIT",
            NodeKind::Continue { .. } => "CONTINUE",
            NodeKind::Declare { .. } => "DECLARE",
            NodeKind::Prepare { .. } => "PREPARE",
            NodeKind::Open { .. } => "OPEN",
            NodeKind::Fetch { .. } => "FETCH",
            NodeKind::Close { .. } => "CLOSE",
            NodeKind::Free { .. } => "FREE",
            NodeKind::Execute { .. } | NodeKind::ExecuteImmediate { .. } => "EXECUTE",
            NodeKind::Display { .. } => "DISPLAY",
            NodeKind::Message { .. } => "MESSAGE",
            NodeKind::ErrorStmt { .. } => "ERROR",
            NodeKind::Initialize { .. } => "INITIALIZE",
            NodeKind::Whenever { .. } => "WHENEVER",
            NodeKind::Sleep { .. } => "SLEEP",
            NodeKind::Defer { .. } => "DEFER",
            NodeKind::Goto { .. } => "GOTO",
            NodeKind::Label { .. } => "LABEL",
            NodeKind::Sql { .. } => "SQL statement",
            NodeKind::Literal { .. } => "literal",
            NodeKind::Name { .. } => "name",
            NodeKind::Unary { .. } | NodeKind::Binary { .. } => "operator expression",
            NodeKind::IsNull { .. } => "IS NULL",
            NodeKind::Paren { .. } => "parenthesized expression",
            NodeKind::Clipped { .. } => "CLIPPED",
            NodeKind::Using { .. } => "USING",
            NodeKind::ScalarType { .. } => "scalar type",
            NodeKind::NamedType { .. } => "named type",
            NodeKind::RecordType { .. } => "RECORD",
            NodeKind::LikeType { .. } => "LIKE",
            NodeKind::ArrayType { .. } => "ARRAY",
            NodeKind::DictionaryType { .. } => "DICTIONARY",
            NodeKind::FunctionType { .. } => "function type",
        }
    }

    pub const fn is_type(&self) -> bool {
        matches!(
            self,
            NodeKind::ScalarType { .. }
                | NodeKind::NamedType { .. }
                | NodeKind::RecordType { .. }
                | NodeKind::LikeType { .. }
                | NodeKind::ArrayType { .. }
                | NodeKind::DictionaryType { .. }
                | NodeKind::FunctionType { .. }
        )
    }

    /// Function, report or MAIN: the constructs that open a local scope.
    pub const fn is_routine(&self) -> bool {
        matches!(self, NodeKind::Function { .. } | NodeKind::Main { .. })
    }
}
