use std::f64::consts::{E, PI, TAU};

/// A named constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
    Tau,
}

impl Constant {
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Constant::Pi),
            "e" => Some(Constant::E),
            "tau" => Some(Constant::Tau),
            _ => None,
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => PI,
            Constant::E => E,
            Constant::Tau => TAU,
        }
    }
}

/// A whitelisted function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sqrt,
    Exp,
    /// Natural log, or `log(x, base)`.
    Log,
    Log10,
    Log2,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Abs,
    Floor,
    Ceil,
    Degrees,
    Radians,
    Hypot,
    Pow,
}

const NAMES: [(&str, Function); 23] = [
    ("sqrt", Function::Sqrt),
    ("exp", Function::Exp),
    ("log", Function::Log),
    ("log10", Function::Log10),
    ("log2", Function::Log2),
    ("sin", Function::Sin),
    ("cos", Function::Cos),
    ("tan", Function::Tan),
    ("asin", Function::Asin),
    ("acos", Function::Acos),
    ("atan", Function::Atan),
    ("atan2", Function::Atan2),
    ("sinh", Function::Sinh),
    ("cosh", Function::Cosh),
    ("tanh", Function::Tanh),
    ("fabs", Function::Abs),
    ("abs", Function::Abs),
    ("floor", Function::Floor),
    ("ceil", Function::Ceil),
    ("degrees", Function::Degrees),
    ("radians", Function::Radians),
    ("hypot", Function::Hypot),
    ("pow", Function::Pow),
];

impl Function {
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, function)| function)
    }

    /// The canonical name, as used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Function::Abs => "abs",
            other => NAMES
                .iter()
                .find(|(_, function)| *function == other)
                .map_or("?", |&(name, _)| name),
        }
    }

    /// Accepted argument counts, as `(min, max)`.
    #[must_use]
    pub fn arity(self) -> (usize, usize) {
        match self {
            Function::Log => (1, 2),
            Function::Atan2 | Function::Hypot | Function::Pow => (2, 2),
            _ => (1, 1),
        }
    }

    pub(crate) fn arity_text(self) -> &'static str {
        match self.arity() {
            (1, 2) => "1 or 2",
            (2, 2) => "2",
            _ => "1",
        }
    }

    /// Applies the function to already-checked arguments.
    pub(crate) fn apply(self, args: &[f64]) -> f64 {
        let x = args.first().copied().unwrap_or(f64::NAN);
        let y = args.get(1).copied();

        match (self, y) {
            (Function::Sqrt, _) => x.sqrt(),
            (Function::Exp, _) => x.exp(),
            (Function::Log, None) => x.ln(),
            (Function::Log, Some(base)) => x.ln() / base.ln(),
            (Function::Log10, _) => x.log10(),
            (Function::Log2, _) => x.log2(),
            (Function::Sin, _) => x.sin(),
            (Function::Cos, _) => x.cos(),
            (Function::Tan, _) => x.tan(),
            (Function::Asin, _) => x.asin(),
            (Function::Acos, _) => x.acos(),
            (Function::Atan, _) => x.atan(),
            (Function::Atan2, Some(y)) => x.atan2(y),
            (Function::Sinh, _) => x.sinh(),
            (Function::Cosh, _) => x.cosh(),
            (Function::Tanh, _) => x.tanh(),
            (Function::Abs, _) => x.abs(),
            (Function::Floor, _) => x.floor(),
            (Function::Ceil, _) => x.ceil(),
            (Function::Degrees, _) => x.to_degrees(),
            (Function::Radians, _) => x.to_radians(),
            (Function::Hypot, Some(y)) => x.hypot(y),
            (Function::Pow, Some(y)) => x.powf(y),
            (Function::Atan2 | Function::Hypot | Function::Pow, None) => f64::NAN,
        }
    }
}
