// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
//
// Domaine volontairement réduit :
// - opérateurs binaires infixes seulement (+ - * /)
// - pas de parenthèses, pas de moins unaire, pas de fonctions
//
// Le convertisseur ne valide PAS l’arité : "3 + + 4" ou "3 +" donnent une RPN
// qui échouera plus tard, à l’évaluation. Ici, on ne fait que réordonner.

use super::jetons::{Associativite, Jeton, Operateur};

/// Faut-il sortir `haut` (sommet de pile) avant d’empiler `courant` ?
fn doit_depiler(courant: Operateur, haut: Operateur) -> bool {
    match courant.associativite() {
        Associativite::Gauche => courant.precedence() <= haut.precedence(),
        Associativite::Droite => courant.precedence() < haut.precedence(),
    }
}

/// Convertit une suite de jetons (infixe, tels que saisis) en RPN.
///
/// Exemple:
///   jetons: [3, +, 4, *, 2]
///   rpn:    [3, 4, 2, *, +]
pub fn to_rpn(jetons: &[Jeton]) -> Vec<Jeton> {
    let mut out: Vec<Jeton> = Vec::with_capacity(jetons.len());
    let mut ops: Vec<Operateur> = Vec::new();

    for jeton in jetons {
        match jeton {
            Jeton::Nombre(_) | Jeton::Ident(_) => out.push(jeton.clone()),

            Jeton::Op(op) => {
                while let Some(&haut) = ops.last() {
                    if !doit_depiler(*op, haut) {
                        break;
                    }
                    out.push(Jeton::Op(haut));
                    ops.pop();
                }
                ops.push(*op);
            }
        }
    }

    // vide la pile ops (ordre de dépilement)
    while let Some(op) = ops.pop() {
        out.push(Jeton::Op(op));
    }

    out
}

/// Classe une suite de jetons texte : les vides et les inconnus sont ignorés.
pub fn classer_jetons<I, S>(jetons: I) -> Vec<Jeton>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    jetons
        .into_iter()
        .filter_map(|s| Jeton::classer(s.as_ref()))
        .collect()
}

/// Contrat “texte” : jetons saisis -> RPN (texte). Ne peut pas échouer.
///
/// Les littéraux numériques ressortent sous leur forme canonique
/// ("007" -> "7", "1e3" -> "1000").
pub fn convertir_postfixe<I, S>(jetons: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    to_rpn(&classer_jetons(jetons))
        .iter()
        .map(Jeton::to_string)
        .collect()
}
