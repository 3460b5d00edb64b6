//! Noyau — évaluation (pipeline réel)
//!
//! jetons (texte) -> classement -> RPN -> pile de valeurs -> normalisation
//!
//! L’évaluateur ne fait pas confiance à la provenance de la RPN : en version
//! texte, il reclasse chaque jeton et signale lui-même les jetons inconnus.

use super::erreur::ErreurEval;
use super::jetons::{format_jetons, Jeton};
use super::normalise::normaliser;
use super::rpn::{classer_jetons, to_rpn};

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
}

/// Valeur d’un identifiant, contrôlée : NaN => VariableInvalide.
fn valeur_ident<R>(nom: &str, resoudre: &mut R) -> Result<f64, ErreurEval>
where
    R: FnMut(&str) -> Result<f64, ErreurEval>,
{
    let v = resoudre(nom)?;
    if v.is_nan() {
        return Err(ErreurEval::VariableInvalide(nom.to_string()));
    }
    Ok(v)
}

/// Un pas d’évaluation sur la pile.
fn empiler<R>(pile: &mut Vec<f64>, jeton: &Jeton, resoudre: &mut R) -> Result<(), ErreurEval>
where
    R: FnMut(&str) -> Result<f64, ErreurEval>,
{
    match jeton {
        Jeton::Nombre(v) => pile.push(*v),
        Jeton::Ident(nom) => pile.push(valeur_ident(nom, resoudre)?),
        Jeton::Op(op) => {
            // premier dépilé = opérande droit
            let b = pile.pop().ok_or(ErreurEval::ExpressionInvalide)?;
            let a = pile.pop().ok_or(ErreurEval::ExpressionInvalide)?;
            pile.push(op.appliquer(a, b)?);
        }
    }
    Ok(())
}

/// Exactement une valeur doit rester sur la pile.
fn valeur_finale(mut pile: Vec<f64>) -> Result<f64, ErreurEval> {
    match (pile.pop(), pile.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(ErreurEval::ExpressionInvalide),
    }
}

/// Évalue une RPN déjà classée (valeur brute, non normalisée).
pub fn eval_rpn<R>(rpn: &[Jeton], mut resoudre: R) -> Result<f64, ErreurEval>
where
    R: FnMut(&str) -> Result<f64, ErreurEval>,
{
    let mut pile: Vec<f64> = Vec::with_capacity(rpn.len());
    for jeton in rpn {
        empiler(&mut pile, jeton, &mut resoudre)?;
    }
    valeur_finale(pile)
}

/// Contrat “texte” : évalue une RPN donnée sous forme de chaînes.
///
/// Les chaînes vides sont ignorées ; toute autre chaîne non classable
/// échoue en `JetonInconnu`.
pub fn evaluer_postfixe<I, S, R>(rpn: I, mut resoudre: R) -> Result<f64, ErreurEval>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: FnMut(&str) -> Result<f64, ErreurEval>,
{
    let mut pile: Vec<f64> = Vec::new();
    for s in rpn {
        let s = s.as_ref();
        if s.is_empty() {
            continue;
        }
        let jeton = Jeton::classer(s).ok_or_else(|| ErreurEval::JetonInconnu(s.to_string()))?;
        empiler(&mut pile, &jeton, &mut resoudre)?;
    }
    valeur_finale(pile)
}

/// API publique : évalue une suite de jetons saisis (infixe) et retourne:
/// - la valeur normalisée
/// - la démarche (jetons, rpn)
pub fn evaluer<I, S, R>(jetons: I, resoudre: R) -> Result<(f64, DemarcheNoyau), ErreurEval>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: FnMut(&str) -> Result<f64, ErreurEval>,
{
    let jetons = classer_jetons(jetons);
    let rpn = to_rpn(&jetons);

    let brut = eval_rpn(&rpn, resoudre)?;

    let d = DemarcheNoyau {
        jetons: format_jetons(&jetons),
        rpn: format_jetons(&rpn),
    };
    Ok((normaliser(brut), d))
}
