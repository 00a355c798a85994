use serde::{Deserialize, Serialize};
use std::fmt;

/// Possible variants to identify a substance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierOption {
    Cas,
    Name,
    IupacName,
    Smiles,
    Inchi,
    Formula,
}

/// A collection of identifiers for a chemical structure or substance.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifier {
    /// CAS number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cas: Option<String>,
    /// Commonly used english name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// IUPAC name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iupac_name: Option<String>,
    /// SMILES key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smiles: Option<String>,
    /// InchI key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inchi: Option<String>,
    /// Chemical formula
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl Identifier {
    /// Create an identifier that only contains a name.
    pub fn from_name(name: &str) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Return the identifier selected by `option`, if it is available.
    pub fn as_str(&self, option: IdentifierOption) -> Option<&str> {
        match option {
            IdentifierOption::Cas => self.cas.as_deref(),
            IdentifierOption::Name => self.name.as_deref(),
            IdentifierOption::IupacName => self.iupac_name.as_deref(),
            IdentifierOption::Smiles => self.smiles.as_deref(),
            IdentifierOption::Inchi => self.inchi.as_deref(),
            IdentifierOption::Formula => self.formula.as_deref(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("cas", &self.cas),
            ("name", &self.name),
            ("iupac_name", &self.iupac_name),
            ("smiles", &self.smiles),
            ("inchi", &self.inchi),
            ("formula", &self.formula),
        ];
        let ids: Vec<_> = fields
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}={v}")))
            .collect();
        write!(f, "Identifier({})", ids.join(", "))
    }
}
