// src/noyau/erreur.rs
//
// Échecs possibles de l’évaluation RPN.
// Le convertisseur et la normalisation ne peuvent pas échouer :
// tout passe par l’évaluateur.

use std::fmt;

/// Les quatre façons dont une évaluation peut échouer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErreurEval {
    /// Pile sous-alimentée par un opérateur, ou pile finale ≠ 1 valeur
    /// (entrée vide, opérandes en trop, opérateurs en trop).
    ExpressionInvalide,
    /// Jeton ni nombre, ni identifiant, ni opérateur connu.
    JetonInconnu(String),
    /// Opérande droit de `/` exactement nul.
    DivisionParZero,
    /// La valeur associée à l’identifiant n’est pas un nombre.
    VariableInvalide(String),
}

impl fmt::Display for ErreurEval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpressionInvalide => write!(f, "expression invalide"),
            Self::JetonInconnu(jeton) => write!(f, "jeton inconnu: '{jeton}'"),
            Self::DivisionParZero => write!(f, "division par zéro"),
            Self::VariableInvalide(nom) => write!(f, "variable invalide: '{nom}'"),
        }
    }
}

impl std::error::Error for ErreurEval {}
