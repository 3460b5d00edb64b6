// src/noyau/jetons.rs
//
// Classement des jetons + table des opérateurs.
//
// Les jetons arrivent déjà isolés (un clic = un jeton), il n’y a donc pas
// de découpage de texte ici : on décide seulement de la nature de chaque
// jeton, une fois, et on produit un `Jeton` étiqueté.

use std::fmt;

use num_traits::Zero;

use super::erreur::ErreurEval;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativite {
    Gauche,
    Droite,
}

/// Table fixe : + - * /
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Operateur {
    pub fn depuis_symbole(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Plus),
            "-" => Some(Self::Moins),
            "*" => Some(Self::Fois),
            "/" => Some(Self::Divise),
            _ => None,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Moins => "-",
            Self::Fois => "*",
            Self::Divise => "/",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Moins => 1,
            Self::Fois | Self::Divise => 2,
        }
    }

    pub fn associativite(self) -> Associativite {
        // Les quatre sont associatifs à gauche : a - b - c = (a - b) - c
        Associativite::Gauche
    }

    /// Applique l’opérateur : `a` = opérande gauche, `b` = opérande droit.
    ///
    /// La division vérifie son diviseur ici même (pas de pré-contrôle ailleurs),
    /// y compris pour `0 / 0`.
    pub fn appliquer(self, a: f64, b: f64) -> Result<f64, ErreurEval> {
        match self {
            Self::Plus => Ok(a + b),
            Self::Moins => Ok(a - b),
            Self::Fois => Ok(a * b),
            Self::Divise => {
                if b.is_zero() {
                    return Err(ErreurEval::DivisionParZero);
                }
                Ok(a / b)
            }
        }
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Jeton {
    Nombre(f64),
    Ident(String),
    Op(Operateur),
}

impl Jeton {
    /// Classe un jeton texte. `None` si vide ou d’un genre inconnu.
    ///
    /// Ordre : nombre, puis identifiant, puis opérateur (un jeton n’est
    /// jamais de deux genres à la fois).
    pub fn classer(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }
        if let Some(v) = lire_nombre(s) {
            return Some(Self::Nombre(v));
        }
        if est_identifiant(s) {
            return Some(Self::Ident(s.to_string()));
        }
        Operateur::depuis_symbole(s).map(Self::Op)
    }

    pub fn est_operande(&self) -> bool {
        matches!(self, Self::Nombre(_) | Self::Ident(_))
    }
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nombre(v) => write!(f, "{v}"),
            Self::Ident(nom) => f.write_str(nom),
            Self::Op(op) => write!(f, "{op}"),
        }
    }
}

/// Lecture “souple” d’un littéral numérique.
///
/// Accepte : espaces autour, signe, point en tête ou en fin (".5", "5."),
/// notation scientifique ("1e3").
/// Refuse : vide, "inf"/"infinity"/"nan" (sous toutes casses), valeurs non finies.
pub fn lire_nombre(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }

    // Le parseur de f64 connaît "inf"/"nan" : un littéral décimal commence
    // toujours par un chiffre ou un point (après le signe éventuel).
    let sans_signe = t.strip_prefix(['+', '-']).unwrap_or(t);
    let premier = sans_signe.chars().next()?;
    if !(premier.is_ascii_digit() || premier == '.') {
        return None;
    }

    let v: f64 = t.parse().ok()?;
    v.is_finite().then_some(v)
}

pub fn est_numerique(s: &str) -> bool {
    lire_nombre(s).is_some()
}

/// `[A-Za-z_][A-Za-z0-9_]*`, et pas numérique.
pub fn est_identifiant(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(c0) = chars.next() else {
        return false;
    };
    if !(c0.is_ascii_alphabetic() || c0 == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !est_numerique(s)
}

/// Nombre ou identifiant.
/// Sert à la saisie : faut-il pousser la valeur en attente avant un opérateur ?
pub fn est_operande(s: &str) -> bool {
    est_numerique(s) || est_identifiant(s)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(Jeton::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
