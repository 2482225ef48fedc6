//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler les deux réductions sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - erreurs acceptées : division par zéro, résultat non fini (puissances)
//! - invariant clé : pile et pas-à-pas donnent la même valeur, ou échouent tous les deux

use std::time::{Duration, Instant};

use super::erreurs::ErreurCalcul;
use super::{reduire, reduire_pas_a_pas};

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
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurCalcul) -> bool {
    match e {
        ErreurCalcul::DivisionParZero => true,
        // 7^(9^9), (-2)^0.5 ...
        ErreurCalcul::Inattendue { detail } => detail.contains("non fini"),
        ErreurCalcul::ParenthesesDesequilibrees => false,
    }
}

fn check_accord(expr: &str) -> Result<f64, ErreurCalcul> {
    let pile = reduire(expr);
    let pas = reduire_pas_a_pas(expr).map(|r| r.valeur);

    match (&pile, &pas) {
        (Ok(a), Ok(b)) => assert_eq!(a, b, "valeurs divergentes pour {expr:?}"),
        (Err(_), Err(_)) => {}
        _ => panic!("une seule réduction échoue pour {expr:?}: pile={pile:?} pas={pas:?}"),
    }
    pile
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_litteral(rng: &mut Rng) -> String {
    let n = rng.pick(10);
    match rng.pick(4) {
        0 => format!("{n}.5"),
        1 => format!("-{n}"),
        _ => format!("{n}"),
    }
}

fn gen_op(rng: &mut Rng) -> char {
    match rng.pick(6) {
        0 => '+',
        1 => '−',
        2 => '×',
        3 => '÷',
        4 => '^',
        _ => '%',
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_litteral(rng);
    }

    match rng.pick(6) {
        0 => gen_litteral(rng),
        1 => format!("({})", gen_expr(rng, depth - 1)),
        2 => format!("-({})", gen_expr(rng, depth - 1)),
        3 => {
            // exposant petit : on veut surtout des succès
            let base = gen_expr(rng, depth - 1);
            format!("({base})^{}", rng.pick(4))
        }
        _ => {
            let a = gen_expr(rng, depth - 1);
            let b = gen_expr(rng, depth - 1);
            let op = gen_op(rng);
            if rng.coin() {
                format!("{a}{op}{b}")
            } else {
                format!("({a}){op}({b})")
            }
        }
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_accord() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        let premier = check_accord(&expr);
        // Même entrée => même sortie
        assert_eq!(premier, reduire(&expr), "non déterministe: {expr:?}");

        match premier {
            Ok(v) => {
                assert!(v.is_finite(), "valeur non finie pour {expr:?}");
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e:?}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_saisie_clavier_equivalente() {
    let t0 = Instant::now();
    let max = Duration::from_secs(1);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..80 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        // alias ASCII + espaces : même résultat
        let clavier = expr
            .replace('−', " - ")
            .replace('×', " * ")
            .replace('÷', " / ");

        assert_eq!(reduire(&expr), reduire(&clavier), "{expr:?} vs {clavier:?}");
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = somme_balancee("0.5", 800);

    assert_eq!(reduire(&expr), Ok(400.0));
    let r = reduire_pas_a_pas(&expr).unwrap_or_else(|e| panic!("err: {e:?}"));
    assert_eq!(r.valeur, 400.0);
    budget(t0, max);
}

#[test]
fn fuzz_safe_imbrication_profonde() {
    let profondeur = 300;
    let expr = format!("{}1+1{}", "(".repeat(profondeur), ")".repeat(profondeur));

    assert_eq!(reduire(&expr), Ok(2.0));
    assert_eq!(reduire_pas_a_pas(&expr).map(|r| r.valeur), Ok(2.0));
}
