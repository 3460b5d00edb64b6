//! Calculatrice RPN
//!
//! - `noyau` : classement des jetons, shunting-yard, évaluation RPN, normalisation
//! - `app`   : session de saisie + vue egui (natif + web)

pub mod app;
pub mod noyau;
