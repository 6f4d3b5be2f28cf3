//! Command-line search path operations (`prepend=LOC`, `append=LOC`, `remove=LOC`).

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Prepend,
    Append,
    Remove,
}

impl OpKind {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "prepend" | "first" => Some(OpKind::Prepend),
            "append" | "last" => Some(OpKind::Append),
            "remove" => Some(OpKind::Remove),
            _ => None,
        }
    }
}

/// One operation; the location text is normalized when it is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    pub kind: OpKind,
    pub location: String,
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, location) = s
            .split_once('=')
            .ok_or_else(|| format!("expected OP=LOCATION, got {:?}", s))?;
        let kind = OpKind::from_str(kind)
            .ok_or_else(|| format!("unknown operation {:?} (prepend, append, remove)", kind))?;
        if location.trim().is_empty() {
            return Err(format!("missing location in {:?}", s));
        }
        Ok(Op {
            kind,
            location: location.to_string(),
        })
    }
}
