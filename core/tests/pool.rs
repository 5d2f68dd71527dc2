//! Pool sizing and tier shares.

use packlab_core::{
    catalog::{Card, CardCatalog},
    config::{GuaranteeRule, SimulationConfig},
    event::SimWarning,
    pool::{build_pools, card_pool_size, effective_denominator},
    rng::{SequenceRng, StreamRng},
    tiers::resolve_tiers,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn catalog(counts: &[(&str, usize)]) -> CardCatalog {
    let cards = counts
        .iter()
        .flat_map(|(rarity, n)| (1..=*n).map(move |i| Card::new(format!("{rarity}-{i:02}"), *rarity)))
        .collect();
    CardCatalog::new(cards)
}

fn config(packs_per_box: u32, boxes_per_case: u32) -> SimulationConfig {
    SimulationConfig::new(6, packs_per_box, boxes_per_case, 1).unwrap()
}

#[test]
fn one_sp_per_box_over_a_24_box_case() {
    init_logging();
    let cards = catalog(&[("SP", 1), ("C", 10)]);
    let tiers = resolve_tiers(&[GuaranteeRule::per_box("SP", 1)]).unwrap();
    let config = config(8, 24);

    let pools = build_pools(&cards, &tiers, &config, &mut StreamRng::from_seed(1));

    assert_eq!(pools.max_denominator, 1);
    assert_eq!(pools.card_pool_size, 192);
    assert_eq!(pools.contributions[0].denominator, 8);
    assert_eq!(pools.contributions[0].requested, 24);
    assert_eq!(pools.rare.len(), 24);
    assert!(pools.rare.iter().all(|c| c.rarity == "SP"));
    assert_eq!(pools.filler.len(), 10);
    assert!(pools.warnings.is_empty(), "unexpected warnings: {:?}", pools.warnings);
}

#[test]
fn no_governed_rarities_means_filler_only() {
    init_logging();
    let cards = catalog(&[("R", 3), ("C", 10)]);
    let tiers = resolve_tiers(&[GuaranteeRule::filler("R"), GuaranteeRule::filler("C")]).unwrap();
    let config = config(8, 24);

    let pools = build_pools(&cards, &tiers, &config, &mut StreamRng::from_seed(1));

    assert_eq!(pools.max_denominator, 1);
    assert_eq!(pools.card_pool_size, 8 * 24);
    assert!(pools.rare.is_empty());
    assert_eq!(pools.filler.len(), 13);
    assert_eq!(pools.warnings, vec![SimWarning::RarePoolEmpty]);
}

#[test]
fn per_case_rules_scale_the_pool() {
    init_logging();
    let cards = catalog(&[("SEC", 2), ("SP", 4), ("SR", 6), ("C", 20)]);
    let rules = vec![
        GuaranteeRule::per_pack("SR", 2),
        GuaranteeRule::per_case("SEC", 2),
        GuaranteeRule::per_box("SP", 1),
    ];
    let tiers = resolve_tiers(&rules).unwrap();
    let config = config(24, 12);

    assert_eq!(card_pool_size(&tiers, &config), 24 * 12 * 2);
    assert_eq!(effective_denominator(&rules[1], &config), 24 * 12 * 2);
    assert_eq!(effective_denominator(&rules[2], &config), 24);
    assert_eq!(effective_denominator(&rules[0], &config), 2);

    let pools = build_pools(&cards, &tiers, &config, &mut StreamRng::from_seed(3));
    let shares: Vec<(&str, u64)> = pools
        .contributions
        .iter()
        .map(|c| (c.rarity.as_str(), c.drawn))
        .collect();
    assert_eq!(shares, vec![("SEC", 1), ("SP", 24), ("SR", 288)]);
    assert_eq!(pools.rare.len(), 313);
    assert!(pools.rare.len() as u64 <= pools.card_pool_size);
}

#[test]
fn governed_rarity_without_cards_contributes_nothing() {
    init_logging();
    let cards = catalog(&[("SR", 3), ("C", 5)]);
    let tiers = resolve_tiers(&[GuaranteeRule::per_box("SP", 1), GuaranteeRule::per_pack("SR", 4)]).unwrap();
    let config = config(8, 4);

    let pools = build_pools(&cards, &tiers, &config, &mut StreamRng::from_seed(5));

    assert_eq!(pools.contributions[0].rarity, "SP");
    assert_eq!(pools.contributions[0].drawn, 0);
    assert_eq!(pools.rare.len(), 32 / 4);
    assert!(pools.rare.iter().all(|c| c.rarity == "SR"));
    assert!(pools
        .warnings
        .contains(&SimWarning::RarityHasNoCards { rarity: "SP".into() }));
}

#[test]
fn rare_pool_never_exceeds_its_size() {
    init_logging();
    let cards = catalog(&[("A", 2), ("B", 2), ("Z", 2), ("C", 4)]);
    let tiers = resolve_tiers(&[
        GuaranteeRule::per_pack("B", 1),
        GuaranteeRule::per_pack("A", 2),
        GuaranteeRule::per_pack("Z", 1),
    ]).unwrap();
    let config = config(2, 2);

    let pools = build_pools(&cards, &tiers, &config, &mut StreamRng::from_seed(8));

    // pool of 4: A takes 2, B wants 4 but only 2 fit, Z is never reached
    assert_eq!(pools.card_pool_size, 4);
    assert_eq!(pools.rare.len(), 4);
    assert_eq!(pools.contributions.len(), 2);
    assert_eq!(
        pools.warnings,
        vec![SimWarning::RarePoolTruncated { rarity: "B".into(), requested: 4, accepted: 2 }]
    );
    assert!(pools.filler.iter().all(|c| c.rarity == "C"));
}

#[test]
fn tier_draws_are_uniform_with_replacement() {
    init_logging();
    let cards = catalog(&[("SP", 2)]);
    let tiers = resolve_tiers(&[GuaranteeRule::per_pack("SP", 1)]).unwrap();
    let config = config(2, 2);

    let mut rng = SequenceRng::new(vec![0.0, 0.6, 0.4, 0.0]);
    let pools = build_pools(&cards, &tiers, &config, &mut rng);

    let ids: Vec<&str> = pools.rare.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["SP-01", "SP-02", "SP-01", "SP-01"]);
    assert!(pools.warnings.contains(&SimWarning::FillerPoolEmpty));
}

#[test]
fn filler_pool_keeps_catalog_order_and_multiplicity() {
    init_logging();
    let cards = CardCatalog::new(vec![
        Card::new("C-1", "C"),
        Card::new("SR-1", "SR"),
        Card::new("U-1", "U"),
        Card::new("C-1", "C"),
    ]);
    let tiers = resolve_tiers(&[GuaranteeRule::per_pack("SR", 1)]).unwrap();
    let pools = build_pools(&cards, &tiers, &config(4, 1), &mut StreamRng::from_seed(2));

    let ids: Vec<&str> = pools.filler.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["C-1", "U-1", "C-1"]);
}
