/// Storage type of a host value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostType {
    Real,
    Integer,
    Logical,
    Text,
    List,
    Null,
}

impl HostType {
    /// Types whose every entry maps to a real without parsing
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, HostType::Real | HostType::Integer | HostType::Logical)
    }

    /// Atomic vectors can carry a `dim` attribute
    #[inline]
    pub const fn is_atomic(&self) -> bool {
        !matches!(self, HostType::List | HostType::Null)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            HostType::Real => "double",
            HostType::Integer => "integer",
            HostType::Logical => "logical",
            HostType::Text => "character",
            HostType::List => "list",
            HostType::Null => "NULL",
        }
    }
}

impl std::fmt::Display for HostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
