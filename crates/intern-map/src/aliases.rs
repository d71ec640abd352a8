//! Canonical fields and the header fragments that identify them.
//!
//! Headers in the wild mix French and English, with and without accents, so
//! both spellings are listed. Matching is by substring (see
//! [`resolve_column`](crate::resolve_column)), so an alias should be specific
//! enough not to appear inside an unrelated header.

use crate::header::FieldSet;

const ACADEMIC_SUPERVISOR: &[&str] = &[
    "encadrant isimm",
    "encadreur isimm",
    "encadrant académique",
    "encadrant academique",
    "encadreur académique",
    "encadreur academique",
    "academic supervisor",
];

const PROFESSIONAL_SUPERVISOR: &[&str] = &[
    "encadrant professionnel",
    "encadreur professionnel",
    "encadrant pro",
    "encadreur pro",
    "professional supervisor",
];

const COMPANY_NAME: &[&str] = &[
    "entreprise",
    "société",
    "societe",
    "organisme",
    "raison sociale",
    "company",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentField {
    Prenom,
    Cin,
    CodeProjet,
    Filiere,
    Score,
    TitreProjet,
    Company,
    Localisation,
    EncadreurAc,
    EncadreurPro,
    DureeStage,
    DebutStage,
    FinStage,
    Collaboration,
    CollaborateurPrenom,
    CollaborateurCin,
    CollaborateurFiliere,
    FicheInformation,
    CahierCharge,
}

impl FieldSet for StudentField {
    const ALL: &'static [Self] = &[
        Self::Prenom,
        Self::Cin,
        Self::CodeProjet,
        Self::Filiere,
        Self::Score,
        Self::TitreProjet,
        Self::Company,
        Self::Localisation,
        Self::EncadreurAc,
        Self::EncadreurPro,
        Self::DureeStage,
        Self::DebutStage,
        Self::FinStage,
        Self::Collaboration,
        Self::CollaborateurPrenom,
        Self::CollaborateurCin,
        Self::CollaborateurFiliere,
        Self::FicheInformation,
        Self::CahierCharge,
    ];

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Prenom => &[
                "prénom",
                "prenom",
                "nom et prénom",
                "nom complet",
                "nom de l'étudiant",
                "nom étudiant",
                "nom etudiant",
                "student name",
                "full name",
            ],
            Self::Cin => &["cin", "carte d'identité", "national id"],
            Self::CodeProjet => &[
                "code projet",
                "code du projet",
                "code pfe",
                "code stage",
                "project code",
                "réf projet",
                "ref projet",
            ],
            Self::Filiere => &["filière", "filiere", "spécialité", "specialite", "parcours"],
            Self::Score => &["note", "score", "grade", "moyenne"],
            Self::TitreProjet => &["titre", "sujet", "intitulé", "intitule", "project title"],
            Self::Company => COMPANY_NAME,
            Self::Localisation => &["localisation", "lieu", "location"],
            Self::EncadreurAc => ACADEMIC_SUPERVISOR,
            Self::EncadreurPro => PROFESSIONAL_SUPERVISOR,
            Self::DureeStage => &["durée", "duree", "duration"],
            Self::DebutStage => &[
                "date début",
                "date debut",
                "date de début",
                "date de debut",
                "début de stage",
                "debut de stage",
                "start date",
            ],
            Self::FinStage => &[
                "date fin",
                "date de fin",
                "fin de stage",
                "end date",
            ],
            Self::Collaboration => &[
                "collaboration",
                "binôme/monôme",
                "binome/monome",
                "monôme/binôme",
                "monome/binome",
                "type de travail",
            ],
            Self::CollaborateurPrenom => &[
                "nom du binôme",
                "nom du binome",
                "nom binôme",
                "nom binome",
                "collaborateur",
                "partenaire",
            ],
            Self::CollaborateurCin => &[
                "cin binôme",
                "cin binome",
                "cin du binôme",
                "cin du binome",
                "cin collaborateur",
            ],
            Self::CollaborateurFiliere => &[
                "filière binôme",
                "filiere binome",
                "filière du binôme",
                "filiere du binome",
                "filière collaborateur",
            ],
            Self::FicheInformation => &["fiche d'information", "fiche information", "fiche info"],
            Self::CahierCharge => &["cahier de charge", "cahier des charges", "cahier charge"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanyField {
    Nom,
    Secteur,
    Adresse,
    Contact,
    Email,
    Telephone,
    EncadrantPro,
}

impl FieldSet for CompanyField {
    const ALL: &'static [Self] = &[
        Self::Nom,
        Self::Secteur,
        Self::Adresse,
        Self::Contact,
        Self::Email,
        Self::Telephone,
        Self::EncadrantPro,
    ];

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Nom => COMPANY_NAME,
            Self::Secteur => &["secteur", "domaine d'activité", "activité", "industry"],
            Self::Adresse => &["adresse", "address"],
            Self::Contact => &["contact", "responsable"],
            Self::Email => &[
                "email entreprise",
                "e-mail entreprise",
                "mail entreprise",
                "email société",
                "email societe",
                "company email",
            ],
            Self::Telephone => &[
                "téléphone entreprise",
                "telephone entreprise",
                "tél entreprise",
                "tel entreprise",
                "téléphone société",
                "company phone",
            ],
            Self::EncadrantPro => PROFESSIONAL_SUPERVISOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupervisorField {
    AcademicName,
    AcademicEmail,
    AcademicPhone,
    ProfessionalName,
    ProfessionalEmail,
    ProfessionalPhone,
}

impl FieldSet for SupervisorField {
    const ALL: &'static [Self] = &[
        Self::AcademicName,
        Self::AcademicEmail,
        Self::AcademicPhone,
        Self::ProfessionalName,
        Self::ProfessionalEmail,
        Self::ProfessionalPhone,
    ];

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::AcademicName => ACADEMIC_SUPERVISOR,
            Self::AcademicEmail => &[
                "email encadrant isimm",
                "email encadreur isimm",
                "mail encadrant isimm",
                "email encadrant académique",
                "email encadrant academique",
                "email académique",
                "email academique",
            ],
            Self::AcademicPhone => &[
                "téléphone encadrant isimm",
                "telephone encadrant isimm",
                "tél encadrant isimm",
                "tel encadrant isimm",
                "téléphone encadrant académique",
                "telephone encadrant academique",
            ],
            Self::ProfessionalName => PROFESSIONAL_SUPERVISOR,
            Self::ProfessionalEmail => &[
                "email encadrant professionnel",
                "email encadreur professionnel",
                "mail encadrant professionnel",
                "email encadrant pro",
                "email professionnel",
            ],
            Self::ProfessionalPhone => &[
                "téléphone encadrant professionnel",
                "telephone encadrant professionnel",
                "tél encadrant professionnel",
                "tel encadrant professionnel",
                "téléphone encadrant pro",
                "telephone encadrant pro",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_lowercase<F: FieldSet + std::fmt::Debug>() {
        for field in F::ALL {
            assert!(!field.aliases().is_empty(), "{field:?} has no alias");
            for alias in field.aliases() {
                assert_eq!(*alias, alias.to_lowercase(), "{field:?} alias {alias}");
            }
        }
    }

    #[test]
    fn aliases_are_lowercase_and_non_empty() {
        assert_lowercase::<StudentField>();
        assert_lowercase::<CompanyField>();
        assert_lowercase::<SupervisorField>();
    }
}
