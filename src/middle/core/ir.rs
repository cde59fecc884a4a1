//! Intermediate Representation
//!
//! SSA-form IR modelled on LLVM's: a module holds functions, a function
//! holds basic blocks, and every instruction defines exactly one named
//! value. The `Display` impls print LLVM-assembly-like text.

use crate::frontend::typecheck::NumType;
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;

/// Value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrType {
    I1,
    I64,
    Double,
}

impl IrType {
    /// Lowered form of a checked type; `None` for `Unresolved`
    pub fn from_num(ty: NumType) -> Option<IrType> {
        match ty {
            NumType::Int => Some(IrType::I64),
            NumType::Double => Some(IrType::Double),
            NumType::Unresolved => None,
        }
    }

    pub fn to_num(self) -> Option<NumType> {
        match self {
            IrType::I64 => Some(NumType::Int),
            IrType::Double => Some(NumType::Double),
            IrType::I1 => None,
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            IrType::I1 => write!(f, "i1"),
            IrType::I64 => write!(f, "i64"),
            IrType::Double => write!(f, "double"),
        }
    }
}

/// Index into a function's instruction arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstId(pub usize);

/// Index into a function's block arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub usize);

/// Instruction operand
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    ConstInt(i64),
    ConstDouble(f64),
    /// Function argument by position
    Arg(usize),
    /// Result of an instruction
    Inst(InstId),
}

/// Arithmetic opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    SDiv,
    FAdd,
    FSub,
    FMul,
    FDiv,
}

impl ArithOp {
    pub fn mnemonic(self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Mul => "mul",
            ArithOp::SDiv => "sdiv",
            ArithOp::FAdd => "fadd",
            ArithOp::FSub => "fsub",
            ArithOp::FMul => "fmul",
            ArithOp::FDiv => "fdiv",
        }
    }

    /// Operand and result type
    pub fn ty(self) -> IrType {
        match self {
            ArithOp::Add | ArithOp::Sub | ArithOp::Mul | ArithOp::SDiv => IrType::I64,
            ArithOp::FAdd | ArithOp::FSub | ArithOp::FMul | ArithOp::FDiv => IrType::Double,
        }
    }
}

/// Integer comparison predicates (signed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntPredicate {
    Eq,
    Ne,
    Slt,
    Sgt,
    Sle,
    Sge,
}

impl IntPredicate {
    pub fn mnemonic(self) -> &'static str {
        match self {
            IntPredicate::Eq => "eq",
            IntPredicate::Ne => "ne",
            IntPredicate::Slt => "slt",
            IntPredicate::Sgt => "sgt",
            IntPredicate::Sle => "sle",
            IntPredicate::Sge => "sge",
        }
    }
}

/// Float comparison predicates (unordered: true if either side is NaN)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatPredicate {
    Ueq,
    Une,
    Ult,
    Ugt,
    Ule,
    Uge,
}

impl FloatPredicate {
    pub fn mnemonic(self) -> &'static str {
        match self {
            FloatPredicate::Ueq => "ueq",
            FloatPredicate::Une => "une",
            FloatPredicate::Ult => "ult",
            FloatPredicate::Ugt => "ugt",
            FloatPredicate::Ule => "ule",
            FloatPredicate::Uge => "uge",
        }
    }
}

/// Instruction kinds
#[derive(Debug, Clone, PartialEq)]
pub enum InstKind {
    Binary {
        op: ArithOp,
        lhs: Value,
        rhs: Value,
    },
    ICmp {
        pred: IntPredicate,
        lhs: Value,
        rhs: Value,
    },
    FCmp {
        pred: FloatPredicate,
        lhs: Value,
        rhs: Value,
    },
    /// i1 -> i64, true becomes 1
    ZExt(Value),
    /// i1 -> double, true becomes 1.0
    UIToFP(Value),
    Call {
        callee: String,
        args: Vec<Value>,
    },
    Phi {
        incoming: Vec<(Value, BlockId)>,
    },
}

/// A named SSA definition
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub name: String,
    pub ty: IrType,
    pub kind: InstKind,
}

/// Block terminators
#[derive(Debug, Clone, PartialEq)]
pub enum Terminator {
    Ret(Value),
    Br(BlockId),
    CondBr {
        cond: Value,
        then_block: BlockId,
        else_block: BlockId,
    },
}

impl Terminator {
    pub fn successors(&self) -> Vec<BlockId> {
        match self {
            Terminator::Ret(_) => Vec::new(),
            Terminator::Br(target) => vec![*target],
            Terminator::CondBr {
                then_block,
                else_block,
                ..
            } => vec![*then_block, *else_block],
        }
    }
}

/// Basic block
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    pub label: String,
    pub insts: Vec<InstId>,
    pub terminator: Option<Terminator>,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: IrType,
}

/// Function: a declaration while it has no blocks
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    pub ret: IrType,
    pub insts: Vec<Instruction>,
    pub blocks: Vec<BasicBlock>,
    /// Order in which blocks are laid out; the first one is the entry
    pub layout: Vec<BlockId>,
    names: HashSet<String>,
    last_unique: usize,
}

impl Function {
    /// A declaration with the given signature
    pub fn declare(
        name: impl Into<String>,
        params: Vec<Param>,
        ret: IrType,
    ) -> Self {
        let mut function = Self {
            name: name.into(),
            params: Vec::new(),
            ret,
            insts: Vec::new(),
            blocks: Vec::new(),
            layout: Vec::new(),
            names: HashSet::new(),
            last_unique: 0,
        };
        for mut param in params {
            param.name = function.unique_name(&param.name);
            function.params.push(param);
        }
        function
    }

    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Reserve a name, appending a numeric suffix if it is taken
    pub fn unique_name(
        &mut self,
        base: &str,
    ) -> String {
        let mut name = base.to_string();
        while !self.names.insert(name.clone()) {
            self.last_unique += 1;
            name = format!("{}{}", base, self.last_unique);
        }
        name
    }

    pub fn inst(
        &self,
        id: InstId,
    ) -> Option<&Instruction> {
        self.insts.get(id.0)
    }

    pub fn block(
        &self,
        id: BlockId,
    ) -> Option<&BasicBlock> {
        self.blocks.get(id.0)
    }

    pub fn entry(&self) -> Option<BlockId> {
        self.layout.first().copied()
    }

    /// Type of an operand, `None` if it refers to nothing
    pub fn value_type(
        &self,
        value: &Value,
    ) -> Option<IrType> {
        match value {
            Value::ConstInt(_) => Some(IrType::I64),
            Value::ConstDouble(_) => Some(IrType::Double),
            Value::Arg(i) => self.params.get(*i).map(|p| p.ty),
            Value::Inst(id) => self.inst(*id).map(|i| i.ty),
        }
    }

    fn value_text(
        &self,
        value: &Value,
    ) -> String {
        match value {
            Value::ConstInt(v) => v.to_string(),
            Value::ConstDouble(v) => format_double(*v),
            Value::Arg(i) => match self.params.get(*i) {
                Some(p) => format!("%{}", p.name),
                None => format!("%arg{}", i),
            },
            Value::Inst(id) => match self.inst(*id) {
                Some(inst) => format!("%{}", inst.name),
                None => format!("%<bad {}>", id.0),
            },
        }
    }

    fn typed_value_text(
        &self,
        value: &Value,
    ) -> String {
        match self.value_type(value) {
            Some(ty) => format!("{} {}", ty, self.value_text(value)),
            None => self.value_text(value),
        }
    }

    fn label_text(
        &self,
        id: BlockId,
    ) -> String {
        match self.block(id) {
            Some(b) => format!("%{}", b.label),
            None => format!("%<bad block {}>", id.0),
        }
    }

    fn write_inst(
        &self,
        f: &mut fmt::Formatter<'_>,
        inst: &Instruction,
    ) -> fmt::Result {
        write!(f, "  %{} = ", inst.name)?;
        match &inst.kind {
            InstKind::Binary { op, lhs, rhs } => write!(
                f,
                "{} {} {}, {}",
                op.mnemonic(),
                op.ty(),
                self.value_text(lhs),
                self.value_text(rhs)
            ),
            InstKind::ICmp { pred, lhs, rhs } => write!(
                f,
                "icmp {} i64 {}, {}",
                pred.mnemonic(),
                self.value_text(lhs),
                self.value_text(rhs)
            ),
            InstKind::FCmp { pred, lhs, rhs } => write!(
                f,
                "fcmp {} double {}, {}",
                pred.mnemonic(),
                self.value_text(lhs),
                self.value_text(rhs)
            ),
            InstKind::ZExt(v) => write!(f, "zext i1 {} to i64", self.value_text(v)),
            InstKind::UIToFP(v) => write!(f, "uitofp i1 {} to double", self.value_text(v)),
            InstKind::Call { callee, args } => {
                let args: Vec<String> = args.iter().map(|a| self.typed_value_text(a)).collect();
                write!(f, "call {} @{}({})", inst.ty, callee, args.join(", "))
            }
            InstKind::Phi { incoming } => {
                let arms: Vec<String> = incoming
                    .iter()
                    .map(|(v, b)| format!("[ {}, {} ]", self.value_text(v), self.label_text(*b)))
                    .collect();
                write!(f, "phi {} {}", inst.ty, arms.join(", "))
            }
        }
    }

    fn write_terminator(
        &self,
        f: &mut fmt::Formatter<'_>,
        term: &Terminator,
    ) -> fmt::Result {
        match term {
            Terminator::Ret(v) => write!(f, "  ret {}", self.typed_value_text(v)),
            Terminator::Br(target) => write!(f, "  br label {}", self.label_text(*target)),
            Terminator::CondBr {
                cond,
                then_block,
                else_block,
            } => write!(
                f,
                "  br i1 {}, label {}, label {}",
                self.value_text(cond),
                self.label_text(*then_block),
                self.label_text(*else_block)
            ),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.is_declaration() {
            let params: Vec<String> = self.params.iter().map(|p| p.ty.to_string()).collect();
            return writeln!(f, "declare {} @{}({})", self.ret, self.name, params.join(", "));
        }

        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{} %{}", p.ty, p.name))
            .collect();
        writeln!(f, "define {} @{}({}) {{", self.ret, self.name, params.join(", "))?;

        for (i, id) in self.layout.iter().enumerate() {
            let Some(block) = self.block(*id) else {
                continue;
            };
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}:", block.label)?;
            for inst_id in &block.insts {
                if let Some(inst) = self.inst(*inst_id) {
                    self.write_inst(f, inst)?;
                    writeln!(f)?;
                }
            }
            if let Some(term) = &block.terminator {
                self.write_terminator(f, term)?;
                writeln!(f)?;
            }
        }
        writeln!(f, "}}")
    }
}

/// Double constant in LLVM's notation: `1.500000e+00` when six digits
/// reproduce the value exactly, otherwise the hex bit pattern
pub fn format_double(v: f64) -> String {
    let sci = format!("{:.6e}", v);
    if sci.parse::<f64>().ok() == Some(v) {
        if let Some((mantissa, exp)) = sci.split_once('e') {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            return format!("{}e{}{:0>2}", mantissa, sign, digits);
        }
    }
    format!("0x{:016X}", v.to_bits())
}

/// IR module
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub name: String,
    functions: IndexMap<String, Function>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: IndexMap::new(),
        }
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.functions.contains_key(name)
    }

    /// Insert or replace a function, keeping its position if it existed
    pub fn insert(
        &mut self,
        function: Function,
    ) -> &mut Function {
        match self.functions.entry(function.name.clone()) {
            Entry::Occupied(mut slot) => {
                slot.insert(function);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(function),
        }
    }

    /// Erase a function, preserving the order of the rest
    pub fn remove(
        &mut self,
        name: &str,
    ) -> Option<Function> {
        self.functions.shift_remove(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Display for Module {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.name)?;
        for function in self.functions.values() {
            writeln!(f)?;
            write!(f, "{}", function)?;
        }
        Ok(())
    }
}
