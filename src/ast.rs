/// Represents an expression node.
///
/// Expressions are parsed from the text of a single statement operand and
/// evaluated immediately against the environment, so nodes carry no source
/// positions; errors quote the expression text instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal such as `42` or `2.5`.
    Number(f64),
    /// Quoted literal such as `'Hola'`.
    Str(String),
    /// Reference to a declared variable.
    Variable(String),
    /// Prefix `+` or `-`.
    UnaryOp {
        /// The operator.
        op:   UnaryOperator,
        /// The operand.
        expr: Box<Self>,
    },
    /// Arithmetic or comparison between two operands.
    BinaryOp {
        /// Left-hand side.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right-hand side.
        right: Box<Self>,
    },
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `+x`
    Plus,
    /// `-x`
    Negate,
}

impl UnaryOperator {
    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Negate => "-",
        }
    }
}

/// Infix operators, from tightest to loosest binding group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
}

impl BinaryOperator {
    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::Greater => ">",
            Self::Less => "<",
        }
    }

    /// Returns `true` for the comparison level of the grammar.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual | Self::Greater | Self::Less)
    }
}

/// A node of the statement tree built by the structurer.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A plain statement.
    Leaf(Leaf),
    /// `IF` / `ELSEIF` / `ELSE` / `ENDIF`.
    ///
    /// `clauses` is never empty; the first entry is the `IF` clause.
    Conditional {
        /// Condition and body pairs in declaration order.
        clauses:   Vec<Clause>,
        /// Body of the `ELSE` branch, if one was written.
        else_body: Option<Vec<Self>>,
    },
    /// `DO <n> TIMES` or `LOOP <n> TIMES`.
    CountedLoop {
        /// Which opener was used; decides the matching terminator.
        keyword: LoopKeyword,
        /// Expression text of the iteration count.
        count:   String,
        /// Statements executed once per pass.
        body:    Vec<Self>,
    },
    /// `LOOP AT <table> INTO <work area>`.
    TableLoop {
        /// Name of the internal table.
        table:     String,
        /// Name of the scalar bound to each element.
        work_area: String,
        /// Statements executed once per element.
        body:      Vec<Self>,
    },
}

/// One `(condition, body)` pair of a conditional.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// Expression text of the condition.
    pub condition: String,
    /// Statements executed when the condition holds.
    pub body:      Vec<Node>,
}

/// The two keywords that open counted loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKeyword {
    /// `DO`, closed by `ENDDO`.
    Do,
    /// `LOOP`, closed by `ENDLOOP`.
    Loop,
}

impl LoopKeyword {
    /// The opening keyword.
    #[must_use]
    pub const fn opener(self) -> &'static str {
        match self {
            Self::Do => "DO",
            Self::Loop => "LOOP",
        }
    }

    /// The keyword that closes this kind of loop.
    #[must_use]
    pub const fn terminator(self) -> &'static str {
        match self {
            Self::Do => "ENDDO",
            Self::Loop => "ENDLOOP",
        }
    }
}

/// A leaf statement together with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// The statement as written, whitespace collapsed.
    pub text:      String,
    /// The classified statement.
    pub statement: Statement,
}

/// Leaf statements, classified once by keyword when the tree is built.
///
/// Operands stay as expression text; they are parsed and evaluated each time
/// the statement runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `DATA` with one or more declarations.
    Data(Vec<Declaration>),
    /// `WRITE` with one or more output items.
    Write(Vec<WriteItem>),
    /// `ADD <amount> TO <target>`.
    Add {
        /// Expression text of the amount.
        amount: String,
        /// Receiving variable.
        target: String,
    },
    /// `SUBTRACT <amount> FROM <target>`.
    Subtract {
        /// Expression text of the amount.
        amount: String,
        /// Receiving variable.
        target: String,
    },
    /// `CLEAR <target>`.
    Clear(String),
    /// `APPEND <value> TO <table>`.
    Append {
        /// Expression text of the new element.
        value: String,
        /// Receiving internal table.
        table: String,
    },
    /// `<target> = <value>`.
    Assign {
        /// Receiving variable.
        target: String,
        /// Expression text of the new value.
        value:  String,
    },
    /// A known keyword whose operands do not have the expected shape.
    Malformed {
        /// The leading keyword.
        keyword: &'static str,
    },
    /// A statement whose keyword is not supported.
    Unsupported,
}

/// A single `name TYPE ...` entry of a `DATA` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Variable name as written.
    pub name:      String,
    /// Declared storage shape, not yet validated.
    pub type_spec: TypeSpec,
    /// Expression text of the `VALUE` initializer.
    pub value:     Option<String>,
}

/// The type part of a declaration as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// `TYPE <name> [LENGTH <n>] [DECIMALS <n>]`.
    Scalar {
        /// Type name as written, e.g. `i` or `string`.
        type_name: String,
        /// `LENGTH` metadata.
        length:    Option<u32>,
        /// `DECIMALS` metadata.
        decimals:  Option<u32>,
    },
    /// `TYPE [STANDARD] TABLE OF <name>`.
    Table {
        /// Element type name as written.
        element: String,
    },
}

/// One comma-separated item of a `WRITE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteItem {
    /// A leading `/` starts a new output line.
    pub new_line: bool,
    /// Expression text of the value, absent for a bare `/`.
    pub value:    Option<String>,
}
