use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{Entity, EntityKind};
use crate::error::Result;
use crate::patch::Patch;
use crate::year::Year;

/// Host company for one academic year, identified by `nom_normalise`.
///
/// The key is the normalized name, or the lowercased, accent-stripped display
/// name when normalization leaves nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub nom: String,
    pub nom_normalise: String,
    pub annee: Year,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secteur: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default = "default_intern_count")]
    pub nombre_stagiaires: u32,
    #[serde(default)]
    pub encadrant_pro: Vec<String>,
}

fn default_intern_count() -> u32 {
    1
}

impl Company {
    /// `nom_normalise` must already be the canonical matching key for `nom`.
    pub fn new(nom: impl Into<String>, nom_normalise: impl Into<String>, annee: Year) -> Self {
        Self {
            nom: nom.into(),
            nom_normalise: nom_normalise.into(),
            annee,
            secteur: None,
            adresse: None,
            contact: None,
            email: None,
            telephone: None,
            nombre_stagiaires: default_intern_count(),
            encadrant_pro: Vec::new(),
        }
    }
}

impl Entity for Company {
    const KIND: EntityKind = EntityKind::Company;
    const KEY_FIELDS: &'static [&'static str] = &["nomNormalise", "annee"];

    type Key = String;

    fn year(&self) -> &Year {
        &self.annee
    }

    fn natural_key(&self) -> String {
        self.nom_normalise.clone()
    }

    /// Intern counts accumulate across imports and supervisor names are unioned.
    fn update_patch(&self) -> Result<Patch> {
        let mut patch = Patch::from_record(self, Self::KEY_FIELDS)?;
        patch.remove("nombreStagiaires");
        patch.remove("encadrantPro");
        patch.increment("nombreStagiaires", i64::from(self.nombre_stagiaires));
        if !self.encadrant_pro.is_empty() {
            let names = self.encadrant_pro.iter().cloned().map(Value::from).collect();
            patch.add_to_set("encadrantPro", names);
        }
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_increments_intern_count_and_unions_supervisors() {
        let year = Year::from_calendar(2022);
        let mut existing = Company::new("Vermeg", "vermeg", year.clone());
        existing.encadrant_pro = vec!["Karim".to_string()];
        existing.secteur = Some("Finance".to_string());

        let mut incoming = Company::new("VERMEG", "vermeg", year);
        incoming.encadrant_pro = vec!["Karim".to_string(), "Leila".to_string()];

        let patch = incoming.update_patch().unwrap();
        let merged = patch.apply_to(&existing).unwrap();
        assert_eq!(merged.nombre_stagiaires, 2);
        assert_eq!(merged.encadrant_pro, vec!["Karim", "Leila"]);
        assert_eq!(merged.nom, "VERMEG");
        assert_eq!(merged.secteur.as_deref(), Some("Finance"));
        assert_eq!(merged.nom_normalise, "vermeg");
    }
}
