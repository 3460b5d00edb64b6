// src/noyau/variable.rs
//
// Variable liée (X) : texte du champ + résolution en nombre.
//
// Règle du champ :
// - vide / blanc => 0 (valeur par défaut, pas une erreur)
// - nombre       => sa valeur
// - autre chose  => VariableInvalide

use super::erreur::ErreurEval;
use super::jetons::lire_nombre;

/// Nom de la variable produite par la saisie.
pub const NOM_VARIABLE: &str = "X";

/// Résout le texte d’un champ pour l’identifiant `nom`.
pub fn resoudre_champ(nom: &str, texte: &str) -> Result<f64, ErreurEval> {
    if texte.trim().is_empty() {
        return Ok(0.0);
    }
    lire_nombre(texte).ok_or_else(|| ErreurEval::VariableInvalide(nom.to_string()))
}

/// Champ de la variable X (texte brut, tel que saisi).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableX {
    texte: String,
}

impl VariableX {
    pub fn new(texte: impl Into<String>) -> Self {
        Self {
            texte: texte.into(),
        }
    }

    pub fn texte(&self) -> &str {
        &self.texte
    }

    /// Accès direct (champ texte de la vue).
    pub fn texte_mut(&mut self) -> &mut String {
        &mut self.texte
    }

    pub fn set_texte(&mut self, texte: impl Into<String>) {
        self.texte = texte.into();
    }

    /// "" ou "0" => remplacé ; sinon => ajouté.
    pub fn ajouter_chiffre(&mut self, c: char) {
        if self.texte.is_empty() || self.texte == "0" {
            self.texte.clear();
        }
        self.texte.push(c);
    }

    /// Efface le dernier caractère ; ne descend pas sous "0".
    pub fn retour_arriere(&mut self) {
        if self.texte.chars().count() <= 1 {
            self.texte = "0".to_string();
        } else {
            self.texte.pop();
        }
    }

    /// Résolveur pour l’évaluateur : tout identifiant lit ce champ.
    pub fn resoudre(&self, nom: &str) -> Result<f64, ErreurEval> {
        resoudre_champ(nom, &self.texte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn champ_vide_vaut_zero() {
        assert_eq!(resoudre_champ("X", ""), Ok(0.0));
        assert_eq!(resoudre_champ("X", "   "), Ok(0.0));
    }

    #[test]
    fn champ_numerique() {
        assert_eq!(resoudre_champ("X", "3"), Ok(3.0));
        assert_eq!(resoudre_champ("X", " -2.5 "), Ok(-2.5));
    }

    #[test]
    fn champ_invalide() {
        assert_eq!(
            resoudre_champ("X", "abc"),
            Err(ErreurEval::VariableInvalide("X".into()))
        );
        assert_eq!(
            resoudre_champ("Y", "3abc"),
            Err(ErreurEval::VariableInvalide("Y".into()))
        );
    }

    #[test]
    fn edition_du_champ() {
        let mut x = VariableX::default();
        x.ajouter_chiffre('4');
        assert_eq!(x.texte(), "4");
        x.ajouter_chiffre('2');
        assert_eq!(x.texte(), "42");
        x.retour_arriere();
        assert_eq!(x.texte(), "4");
        x.retour_arriere();
        assert_eq!(x.texte(), "0");
        x.ajouter_chiffre('7');
        assert_eq!(x.texte(), "7");
        assert_eq!(x.resoudre("X"), Ok(7.0));
    }

    #[test]
    fn retour_arriere_sur_vide() {
        let mut x = VariableX::new("");
        x.retour_arriere();
        assert_eq!(x.texte(), "0");
    }
}
