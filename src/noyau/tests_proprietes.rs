//! Tests de propriétés (proptest) sur la réduction.

use proptest::prelude::*;

use super::erreurs::ErreurCalcul;
use super::format::format_nombre;
use super::{reduire, reduire_pas_a_pas};

// Littéraux : entiers, décimaux, négatifs
fn litteral() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..100).prop_map(|n| n.to_string()),
        (0u32..100, 1u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
        (1u32..100).prop_map(|n| format!("-{n}")),
    ]
}

fn operateur() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['+', '−', '×', '÷', '^', '%'])
}

// Expressions équilibrées, bien formées
fn expression() -> impl Strategy<Value = String> {
    litteral().prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), operateur(), inner.clone())
                .prop_map(|(a, op, b)| format!("{a}{op}{b}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.prop_map(|e| format!("-({e})")),
        ]
    })
}

proptest! {
    #[test]
    fn pile_et_pas_a_pas_concordent(expr in expression()) {
        let pile = reduire(&expr);
        let pas = reduire_pas_a_pas(&expr).map(|r| r.valeur);
        match (&pile, &pas) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b, "expr={:?}", expr),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "expr={:?} pile={:?} pas={:?}", expr, pile, pas),
        }
    }

    #[test]
    fn jamais_de_valeur_non_finie(expr in expression()) {
        if let Ok(v) = reduire(&expr) {
            prop_assert!(v.is_finite());
        }
    }

    #[test]
    fn idempotence_sur_un_nombre(v in -1.0e6f64..1.0e6f64) {
        let texte = format_nombre(v);
        prop_assert_eq!(reduire(&texte), Ok(v));
        let r = reduire_pas_a_pas(&texte).unwrap();
        prop_assert!(r.etapes.is_empty());
        prop_assert_eq!(r.valeur, v);
    }

    #[test]
    fn parenthese_en_trop_refusee(expr in expression(), devant in any::<bool>()) {
        let bancale = if devant { format!("({expr}") } else { format!("{expr})") };
        prop_assert_eq!(reduire(&bancale), Err(ErreurCalcul::ParenthesesDesequilibrees));
        prop_assert_eq!(
            reduire_pas_a_pas(&bancale).map(|r| r.valeur),
            Err(ErreurCalcul::ParenthesesDesequilibrees)
        );
    }

    #[test]
    fn priorite_produit_sur_somme(a in 0i32..1000, b in 0i32..1000, c in 0i32..1000) {
        let attendu = f64::from(a) + f64::from(b) * f64::from(c);
        prop_assert_eq!(reduire(&format!("{a}+{b}×{c}")), Ok(attendu));
        prop_assert_eq!(reduire(&format!("({a}+{b})×{c}")), Ok((f64::from(a) + f64::from(b)) * f64::from(c)));
    }

    #[test]
    fn gauche_a_droite_dans_le_palier_multiplicatif(a in 1i32..1000, b in 1i32..1000, c in 1i32..1000) {
        let (fa, fb, fc) = (f64::from(a), f64::from(b), f64::from(c));
        prop_assert_eq!(reduire(&format!("{a}÷{b}×{c}")), Ok(fa / fb * fc));
        prop_assert_eq!(reduire(&format!("{a}×{b}÷{c}")), Ok(fa * fb / fc));
    }

    #[test]
    fn pourcent_de(a in -1000i32..1000, b in -1000i32..1000) {
        let attendu = f64::from(b) / 100.0 * f64::from(a);
        prop_assert_eq!(reduire(&format!("{a}%{b}")), Ok(attendu));
    }

    #[test]
    fn diviser_par_zero_toujours_signale(expr in expression()) {
        let s = format!("({expr})÷0");
        match reduire(&s) {
            Err(ErreurCalcul::DivisionParZero) => {}
            // l’expression de gauche a déjà échoué (÷0 ou non fini)
            Err(_) => prop_assert!(reduire(&expr).is_err()),
            Ok(v) => prop_assert!(false, "{:?} a donné {}", s, v),
        }
    }
}
