use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityKind};
use crate::year::Year;

/// Supervisor category; academic and professional names live in separate key spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Categorie {
    Academique,
    Professionnel,
}

impl Categorie {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Academique => "academique",
            Self::Professionnel => "professionnel",
        }
    }
}

impl fmt::Display for Categorie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Natural key of a supervisor within a year bucket.
///
/// Two different people sharing a display name in the same category and year
/// collide on this key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SupervisorKey {
    pub prenom: String,
    pub categorie: Categorie,
}

impl fmt::Display for SupervisorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.prenom, self.categorie)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supervisor {
    pub prenom: String,
    pub categorie: Categorie,
    pub annee: Year,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default)]
    pub nombre_etudiants: u32,
}

impl Supervisor {
    pub fn new(prenom: impl Into<String>, categorie: Categorie, annee: Year) -> Self {
        Self {
            prenom: prenom.into(),
            categorie,
            annee,
            email: None,
            telephone: None,
            nombre_etudiants: 1,
        }
    }
}

impl Entity for Supervisor {
    const KIND: EntityKind = EntityKind::Supervisor;
    const KEY_FIELDS: &'static [&'static str] = &["prenom", "categorie", "annee"];

    type Key = SupervisorKey;

    fn year(&self) -> &Year {
        &self.annee
    }

    fn natural_key(&self) -> SupervisorKey {
        SupervisorKey {
            prenom: self.prenom.clone(),
            categorie: self.categorie,
        }
    }
}
