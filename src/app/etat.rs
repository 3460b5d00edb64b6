//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir la session de saisie (jetons validés, jeton en cours, phase)
//! et la variable X, avec des transitions explicites :
//!
//!   Repos -> Saisie -> Evalue -> (Saisie | Repos)
//!
//! Contrats :
//! - Le noyau reçoit les jetons par référence, jamais d’état global.
//! - Tout échec du noyau remet la saisie à zéro et affiche un indicateur générique ;
//!   l’erreur typée reste disponible pour un message détaillé.

use log::{debug, warn};

use crate::noyau::variable::NOM_VARIABLE;
use crate::noyau::{
    est_operande, evaluer, formater_resultat, DemarcheNoyau, ErreurEval, Operateur, VariableX,
};

/// Valeur en attente par défaut.
const COURANT_INITIAL: &str = "0";

/// Indicateur affiché après un échec (les quatre genres sont confondus).
pub const AFFICHAGE_ERREUR: &str = "Erreur";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Repos,
    Saisie,
    Evalue,
}

fn est_operateur(jeton: &str) -> bool {
    Operateur::depuis_symbole(jeton).is_some()
}

/// Session de saisie : jetons validés + jeton en cours.
#[derive(Clone, Debug)]
pub struct Session {
    jetons: Vec<String>,
    courant: String,
    phase: Phase,
    dernier: Option<f64>,
    erreur: Option<ErreurEval>,
    demarche: DemarcheNoyau,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            jetons: Vec::new(),
            courant: COURANT_INITIAL.to_string(),
            phase: Phase::Repos,
            dernier: None,
            erreur: None,
            demarche: DemarcheNoyau::default(),
        }
    }
}

impl Session {
    /* ------------------------ Lecture ------------------------ */

    pub fn jetons(&self) -> &[String] {
        &self.jetons
    }

    pub fn courant(&self) -> &str {
        &self.courant
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn derniere_erreur(&self) -> Option<&ErreurEval> {
        self.erreur.as_ref()
    }

    pub fn demarche(&self) -> &DemarcheNoyau {
        &self.demarche
    }

    /// Texte de l’afficheur : le jeton en cours, ou l’indicateur d’erreur.
    pub fn affichage(&self) -> &str {
        if self.erreur.is_some() {
            AFFICHAGE_ERREUR
        } else {
            &self.courant
        }
    }

    /* ------------------------ Transitions internes ------------------------ */

    /// Toute saisie efface l’erreur affichée et repasse en Saisie.
    fn debut_saisie(&mut self) {
        self.erreur = None;
        self.phase = Phase::Saisie;
    }

    /// Après une évaluation réussie, une nouvelle saisie repart de zéro.
    fn repartir(&mut self, courant: &str) {
        self.jetons.clear();
        self.courant = courant.to_string();
        self.debut_saisie();
    }

    /// Valide le jeton en cours.
    ///
    /// Le "0" par défaut n’est validé qu’en tête d’expression ou juste après
    /// un opérateur ; ailleurs il n’a pas été tapé, on l’oublie.
    fn valider_courant(&mut self) {
        if self.courant.is_empty() {
            return;
        }

        if self.courant == COURANT_INITIAL {
            let apres_operande = self.jetons.last().is_some_and(|j| est_operande(j));
            if !apres_operande {
                self.jetons.push(COURANT_INITIAL.to_string());
            }
            return;
        }

        let c = std::mem::replace(&mut self.courant, COURANT_INITIAL.to_string());
        self.jetons.push(c);
    }

    /* ------------------------ Actions ------------------------ */

    pub fn saisir_chiffre(&mut self, c: char) {
        if self.phase == Phase::Evalue {
            self.repartir(&c.to_string());
            return;
        }
        self.debut_saisie();

        if self.courant == COURANT_INITIAL {
            self.courant.clear();
        }
        self.courant.push(c);
    }

    pub fn saisir_decimale(&mut self) {
        if self.phase == Phase::Evalue {
            self.repartir("0.");
            return;
        }
        self.debut_saisie();

        if !self.courant.contains('.') {
            self.courant.push('.');
        }
    }

    /// Opérateur : après une évaluation, le résultat devient le premier jeton.
    /// Un opérateur tapé juste après un autre le remplace.
    pub fn saisir_operateur(&mut self, op: Operateur) {
        let apres_operateur = self.jetons.last().is_some_and(|j| est_operateur(j));
        let remplace = apres_operateur && self.courant == COURANT_INITIAL;

        if self.phase == Phase::Evalue {
            self.jetons = vec![std::mem::take(&mut self.courant)];
        } else if remplace {
            self.jetons.pop();
        } else {
            self.valider_courant();
        }
        self.debut_saisie();

        self.jetons.push(op.symbole().to_string());
        self.courant = COURANT_INITIAL.to_string();
    }

    pub fn inserer_variable(&mut self, nom: &str) {
        if self.phase == Phase::Evalue {
            self.repartir(nom);
            return;
        }
        self.debut_saisie();

        if self.courant != COURANT_INITIAL {
            self.valider_courant();
        }
        self.jetons.push(nom.to_string());
        self.courant = COURANT_INITIAL.to_string();
    }

    /// AC : remise à zéro totale.
    pub fn effacer_tout(&mut self) {
        *self = Self::default();
    }

    /// DEL : un caractère du jeton en cours (après une évaluation, l’expression part aussi).
    pub fn retour_arriere(&mut self) {
        if self.phase == Phase::Evalue {
            self.jetons.clear();
        }
        self.debut_saisie();

        if self.courant.chars().count() > 1 {
            self.courant.pop();
        } else {
            self.courant = COURANT_INITIAL.to_string();
        }
    }

    /// Retire le jeton validé `index` et le remet en cours d’édition.
    pub fn retirer_jeton(&mut self, index: usize) {
        if index >= self.jetons.len() {
            return;
        }
        self.courant = self.jetons.remove(index);
        self.debut_saisie();
    }

    /// "=" : valide le jeton en cours puis évalue.
    ///
    /// Succès : le résultat normalisé devient le jeton en cours (graine de la
    /// prochaine expression). Échec : saisie remise à zéro, erreur conservée.
    pub fn egal<R>(&mut self, resoudre: R) -> Result<f64, ErreurEval>
    where
        R: FnMut(&str) -> Result<f64, ErreurEval>,
    {
        if self.phase == Phase::Evalue {
            if let Some(v) = self.dernier {
                return Ok(v);
            }
        }

        self.valider_courant();

        match evaluer(&self.jetons, resoudre) {
            Ok((v, demarche)) => {
                debug!("évaluation: {} => {} => {v}", demarche.jetons, demarche.rpn);
                self.courant = formater_resultat(v);
                self.phase = Phase::Evalue;
                self.dernier = Some(v);
                self.erreur = None;
                self.demarche = demarche;
                Ok(v)
            }
            Err(e) => {
                warn!("évaluation échouée ({:?}): {e}", self.jetons);
                *self = Self {
                    erreur: Some(e.clone()),
                    ..Self::default()
                };
                Err(e)
            }
        }
    }
}

/// Une touche du pavé (ou du clavier), déjà interprétée.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Chiffre(char),
    Decimale,
    Op(Operateur),
    Variable,
    Egal,
    Retour,
    EffacerTout,
    // champ X
    ChiffreX(char),
    RetourX,
}

impl Touche {
    /// Caractère tapé -> touche. "," vaut ".", "x" vaut "X".
    pub fn depuis_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Chiffre(c)),
            '.' | ',' => Some(Self::Decimale),
            '=' => Some(Self::Egal),
            'x' | 'X' => Some(Self::Variable),
            _ => {
                let mut buf = [0u8; 4];
                Operateur::depuis_symbole(c.encode_utf8(&mut buf)).map(Self::Op)
            }
        }
    }
}

/// État complet de l’application : session + variable X.
#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    pub session: Session,
    pub variable: VariableX,
}

impl AppCalc {
    /// Évalue avec la variable X comme résolveur.
    pub fn evaluer(&mut self) -> Result<f64, ErreurEval> {
        let variable = &self.variable;
        self.session.egal(|nom| variable.resoudre(nom))
    }

    pub fn appuyer(&mut self, touche: Touche) {
        match touche {
            Touche::Chiffre(c) => self.session.saisir_chiffre(c),
            Touche::Decimale => self.session.saisir_decimale(),
            Touche::Op(op) => self.session.saisir_operateur(op),
            Touche::Variable => self.session.inserer_variable(NOM_VARIABLE),
            Touche::Egal => {
                // l’erreur reste dans la session (affichage + message)
                let _ = self.evaluer();
            }
            Touche::Retour => self.session.retour_arriere(),
            Touche::EffacerTout => self.session.effacer_tout(),
            Touche::ChiffreX(c) => self.variable.ajouter_chiffre(c),
            Touche::RetourX => self.variable.retour_arriere(),
        }
    }

    /// Message détaillé de la dernière erreur (vide si aucune).
    pub fn message_erreur(&self) -> String {
        self.session
            .derniere_erreur()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}
