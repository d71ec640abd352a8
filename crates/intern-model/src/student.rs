use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityKind};
use crate::year::Year;

/// Where the internship takes place relative to the institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalisationType {
    Interne,
    Externe,
}

/// Team shape of the project: a pair (`Binome`) or a solo student (`Monome`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collaboration {
    Binome,
    #[default]
    Monome,
}

impl Collaboration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binome => "binome",
            Self::Monome => "monome",
        }
    }
}

impl fmt::Display for Collaboration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial description of the teammate of a `Binome` student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborateur {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prenom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cin: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filiere: Option<String>,
}

impl Collaborateur {
    pub fn is_empty(&self) -> bool {
        self.prenom.is_none() && self.cin.is_none() && self.filiere.is_none()
    }
}

/// One intern, identified within a year by national ID (`cin`).
///
/// `prenom` holds the full display name. Company and supervisor fields are
/// soft references by display name, resolved after persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub prenom: String,
    pub cin: i64,
    pub code_projet: String,
    pub annee: Year,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filiere: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titre_projet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(
        rename = "localisation_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub localisation_type: Option<LocalisationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encadreur_ac_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encadreur_pro_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duree_stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debut_stage: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fin_stage: Option<NaiveDate>,
    #[serde(default)]
    pub collaboration: Collaboration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborateur: Option<Collaborateur>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiche_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cahier_charge: Option<String>,
}

impl Student {
    /// Creates a student with only the identity fields set.
    pub fn new(prenom: impl Into<String>, cin: i64, code_projet: impl Into<String>, annee: Year) -> Self {
        Self {
            prenom: prenom.into(),
            cin,
            code_projet: code_projet.into(),
            annee,
            filiere: None,
            score: None,
            titre_projet: None,
            company_id: None,
            localisation_type: None,
            encadreur_ac_id: None,
            encadreur_pro_id: None,
            duree_stage: None,
            debut_stage: None,
            fin_stage: None,
            collaboration: Collaboration::Monome,
            collaborateur: None,
            fiche_information: None,
            cahier_charge: None,
        }
    }

    /// A student is kept only when name, project code and CIN are all present.
    pub fn is_valid(&self) -> bool {
        !self.prenom.trim().is_empty() && !self.code_projet.trim().is_empty() && self.cin != 0
    }
}

impl Entity for Student {
    const KIND: EntityKind = EntityKind::Student;
    const KEY_FIELDS: &'static [&'static str] = &["cin", "annee"];

    type Key = i64;

    fn year(&self) -> &Year {
        &self.annee
    }

    fn natural_key(&self) -> i64 {
        self.cin
    }
}
