// src/noyau/normalise.rs
//
// Normalisation du résultat : cosmétique seulement.
// - entier => inchangé (exact)
// - sinon  => arrondi à DECIMALES décimales (efface le bruit binaire : 0.1 + 0.2 => 0.3)

/// Nombre de décimales conservées.
pub const DECIMALES: usize = 10;

/// Un f64 fini a au plus 1074 décimales : à cette précision, le formatage est exact.
const DECIMALES_EXACTES: usize = 1074;

/// Arrondit un résultat à `DECIMALES` décimales, sauf s’il est entier.
///
/// Arrondi décimal sur le développement exact, égalité (…5 pile) arrondie
/// en s’éloignant de zéro : 1/2048 = 0.00048828125 => 0.0004882813.
pub fn normaliser(v: f64) -> f64 {
    if !v.is_finite() || v.fract() == 0.0 {
        return v;
    }
    arrondir_loin_de_zero(v, DECIMALES).unwrap_or(v)
}

fn arrondir_loin_de_zero(v: f64, decimales: usize) -> Option<f64> {
    let exact = format!("{:.*}", DECIMALES_EXACTES, v.abs());
    let (entier, frac) = exact.split_once('.')?;
    let garde = *frac.as_bytes().get(decimales)?;

    let mut chiffres: Vec<u8> = entier
        .bytes()
        .chain(frac.bytes().take(decimales))
        .collect();

    if garde >= b'5' {
        // retenue de droite à gauche
        let mut retenue = true;
        for c in chiffres.iter_mut().rev() {
            if *c == b'9' {
                *c = b'0';
            } else {
                *c += 1;
                retenue = false;
                break;
            }
        }
        if retenue {
            chiffres.insert(0, b'1');
        }
    }

    let coupure = chiffres.len() - decimales;
    let texte = format!(
        "{}.{}",
        std::str::from_utf8(&chiffres[..coupure]).ok()?,
        std::str::from_utf8(&chiffres[coupure..]).ok()?
    );
    let arrondi: f64 = texte.parse().ok()?;
    Some(if v < 0.0 { -arrondi } else { arrondi })
}

/// Texte affiché pour un résultat (déjà normalisé ou non).
/// "-0" s’affiche "0".
pub fn formater_resultat(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entiers_intacts() {
        assert_eq!(normaliser(3.0), 3.0);
        assert_eq!(normaliser(-12.0), -12.0);
        assert_eq!(normaliser(1e21), 1e21);
        assert_eq!(normaliser(0.0), 0.0);
    }

    #[test]
    fn bruit_binaire_efface() {
        assert_eq!(normaliser(0.1 + 0.2), 0.3);
        assert_eq!(normaliser(1.1 * 3.0), 3.3);
        assert_eq!(normaliser(0.7 - 0.1 * 7.0 + 0.5), 0.5);
    }

    #[test]
    fn precision_dix_decimales() {
        assert_eq!(normaliser(1.0 / 3.0), 0.3333333333);
        assert_eq!(normaliser(2.0 / 3.0), 0.6666666667);
        assert_eq!(normaliser(-1.0 / 3.0), -0.3333333333);
        assert_eq!(normaliser(0.00000000004), 0.0);
    }

    #[test]
    fn egalite_exacte_loin_de_zero() {
        // 1/2048 = 0.00048828125 exactement : le 11e chiffre est un 5 pile
        assert_eq!(normaliser(1.0 / 2048.0), 0.0004882813);
        assert_eq!(normaliser(-1.0 / 2048.0), -0.0004882813);
        assert_eq!(normaliser(3.0 / 2048.0), 0.0014648438);
    }

    #[test]
    fn retenue_propagee() {
        assert_eq!(normaliser(0.99999999999), 1.0);
        assert_eq!(normaliser(9.99999999996), 10.0);
        assert_eq!(normaliser(-0.99999999999), -1.0);
    }

    #[test]
    fn idempotent() {
        for v in [0.1 + 0.2, 1.0 / 3.0, 2.0 / 7.0, 123456.789012345678, -5.55555555555] {
            let n = normaliser(v);
            assert_eq!(normaliser(n), n, "v={v}");
        }
    }

    #[test]
    fn non_finis_inchanges() {
        assert!(normaliser(f64::NAN).is_nan());
        assert_eq!(normaliser(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn affichage() {
        assert_eq!(formater_resultat(5.0), "5");
        assert_eq!(formater_resultat(0.3), "0.3");
        assert_eq!(formater_resultat(-0.0), "0");
        assert_eq!(formater_resultat(-2.5), "-2.5");
    }
}
