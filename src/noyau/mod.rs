//! Noyau RPN (pur, sans état, sans UI)
//!
//! Organisation interne :
//! - jetons.rs    : classement des jetons + table des opérateurs
//! - rpn.rs       : shunting-yard (infixe -> RPN)
//! - eval.rs      : évaluation RPN + pipeline complet
//! - normalise.rs : arrondi cosmétique + texte affiché
//! - variable.rs  : variable X (champ texte -> nombre)
//! - erreur.rs    : les quatre échecs possibles

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod normalise;
pub mod rpn;
pub mod variable;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use erreur::ErreurEval;
pub use eval::{eval_rpn, evaluer, evaluer_postfixe, DemarcheNoyau};
pub use jetons::{est_identifiant, est_numerique, est_operande, Jeton, Operateur};
pub use normalise::{formater_resultat, normaliser};
pub use rpn::{convertir_postfixe, to_rpn};
pub use variable::{resoudre_champ, VariableX};
