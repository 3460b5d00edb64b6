//! Tests de propriétés (campagne) : déterminisme + limites contrôlées.
//!
//! - RNG déterministe (seed fixe)
//! - longueurs bornées
//! - budget temps global
//!
//! Référence : évaluation directe à deux niveaux (termes * / d’abord, puis + -,
//! chaque niveau de gauche à droite). Même ordre d’opérations que la RPN,
//! donc égalité exacte des flottants.

use std::time::{Duration, Instant};

use super::erreur::ErreurEval;
use super::eval::{evaluer, evaluer_postfixe};
use super::jetons::{Jeton, Operateur};
use super::normalise::normaliser;
use super::rpn::{classer_jetons, convertir_postfixe};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération ------------------------ */

const VALEUR_X: f64 = 2.5;

fn resoudre_x(nom: &str) -> Result<f64, ErreurEval> {
    match nom {
        "X" => Ok(VALEUR_X),
        _ => Err(ErreurEval::VariableInvalide(nom.to_string())),
    }
}

fn gen_operande(rng: &mut Rng) -> String {
    match rng.pick(12) {
        0 => "X".to_string(),
        1 => "0.1".to_string(),
        2 => "0.2".to_string(),
        3 => "1.5".to_string(),
        n => (n - 4).to_string(), // 0..=7
    }
}

fn gen_operateur(rng: &mut Rng) -> &'static str {
    ["+", "-", "*", "/"][rng.pick(4) as usize]
}

/// Suite équilibrée : opérande (op opérande)*
fn gen_equilibree(rng: &mut Rng, max_ops: u32) -> Vec<String> {
    let n = rng.pick(max_ops + 1);
    let mut out = vec![gen_operande(rng)];
    for _ in 0..n {
        out.push(gen_operateur(rng).to_string());
        out.push(gen_operande(rng));
    }
    out
}

/// Suite quelconque (aucune alternance garantie).
fn gen_libre(rng: &mut Rng, max_len: u32) -> Vec<String> {
    let n = rng.pick(max_len + 1);
    (0..n)
        .map(|_| {
            if rng.pick(2) == 0 {
                gen_operande(rng)
            } else {
                gen_operateur(rng).to_string()
            }
        })
        .collect()
}

/* ------------------------ Référence ------------------------ */

fn valeur(s: &str) -> f64 {
    match Jeton::classer(s) {
        Some(Jeton::Nombre(v)) => v,
        Some(Jeton::Ident(_)) => VALEUR_X,
        other => panic!("opérande attendu, reçu {other:?}"),
    }
}

/// Évaluation directe, sans RPN.
fn reference(jetons: &[String]) -> Result<f64, ErreurEval> {
    let mut somme: Option<(f64, Operateur)> = None;
    let mut terme = valeur(&jetons[0]);

    let mut i = 1;
    while i + 1 < jetons.len() {
        let op = Operateur::depuis_symbole(&jetons[i]).expect("opérateur");
        let v = valeur(&jetons[i + 1]);
        match op {
            Operateur::Fois | Operateur::Divise => terme = op.appliquer(terme, v)?,
            Operateur::Plus | Operateur::Moins => {
                let acc = match somme {
                    Some((acc, op_prec)) => op_prec.appliquer(acc, terme)?,
                    None => terme,
                };
                somme = Some((acc, op));
                terme = v;
            }
        }
        i += 2;
    }

    match somme {
        Some((acc, op)) => op.appliquer(acc, terme),
        None => Ok(terme),
    }
}

/* ------------------------ Propriétés ------------------------ */

#[test]
fn prop_rpn_egale_reference() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0xC0FFEE);

    for _ in 0..3000 {
        budget(start, max);
        let jetons = gen_equilibree(&mut rng, 6);

        let attendu = reference(&jetons);
        let obtenu = evaluer_postfixe(convertir_postfixe(&jetons), resoudre_x);
        assert_eq!(obtenu, attendu, "jetons={jetons:?}");

        // pipeline complet = même chose, normalisé
        let complet = evaluer(&jetons, resoudre_x).map(|(v, _d)| v);
        assert_eq!(complet, attendu.map(normaliser), "jetons={jetons:?}");
    }
}

#[test]
fn prop_arite_desequilibree_echoue() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(42);

    for _ in 0..3000 {
        budget(start, max);
        let jetons = gen_libre(&mut rng, 8);

        let classes = classer_jetons(&jetons);
        let operandes = classes.iter().filter(|j| j.est_operande()).count();
        let operateurs = classes.len() - operandes;

        // ne panique jamais
        let rpn = convertir_postfixe(&jetons);
        assert_eq!(rpn.len(), classes.len());

        if operandes != operateurs + 1 {
            let r = evaluer_postfixe(&rpn, resoudre_x);
            assert!(
                matches!(
                    r,
                    Err(ErreurEval::ExpressionInvalide) | Err(ErreurEval::DivisionParZero)
                ),
                "jetons={jetons:?} r={r:?}"
            );
        }
    }
}

#[test]
fn prop_normalisation_idempotente() {
    let mut rng = Rng::new(7);

    for _ in 0..5000 {
        let a = rng.next_u32() as f64 / 1000.0;
        let b = (rng.pick(999) + 1) as f64;
        let x = if rng.pick(2) == 0 { a / b } else { -a / b };

        let n = normaliser(x);
        assert_eq!(normaliser(n), n, "x={x}");
    }
}

#[test]
fn prop_division_par_zero_quel_que_soit_le_resolveur() {
    let resolveurs: [fn(&str) -> Result<f64, ErreurEval>; 3] = [
        |_| Ok(0.0),
        |_| Ok(f64::NAN),
        |n| Err(ErreurEval::VariableInvalide(n.to_string())),
    ];
    for r in resolveurs {
        assert_eq!(
            evaluer_postfixe(convertir_postfixe(["5", "/", "0"]), r),
            Err(ErreurEval::DivisionParZero)
        );
    }
}
