use pegdeck_core::{
    CardCatalog, CardDefinition, CardEffect, EffectAccumulator, Infusion, Rarity,
};

macro_rules! keyword_case {
    ($name:ident, $keyword:expr, $expected:expr) => {
        #[test]
        fn $name() {
            assert_eq!(CardEffect::from_key($keyword), $expected);
        }
    };
}

keyword_case!(
    keyword_flame_infusion,
    "flame-infusion",
    CardEffect::Infusion(Infusion::Flame)
);
keyword_case!(
    keyword_fire_infusion,
    "Fire-Infusion",
    CardEffect::Infusion(Infusion::Flame)
);
keyword_case!(
    keyword_water_infusion,
    "water_infusion",
    CardEffect::Infusion(Infusion::Water)
);
keyword_case!(
    keyword_water_infusion_spaced,
    " Water Infusion ",
    CardEffect::Infusion(Infusion::Water)
);
keyword_case!(
    keyword_earth_infusion,
    "earthinfusion",
    CardEffect::Infusion(Infusion::Earth)
);
keyword_case!(
    keyword_storm_infusion,
    "storm-infusion",
    CardEffect::Infusion(Infusion::Storm)
);
keyword_case!(
    keyword_lightning_infusion,
    "lightning-infusion",
    CardEffect::Infusion(Infusion::Storm)
);
keyword_case!(keyword_stone_breaker, "stone-breaker", CardEffect::StoneBreaker);
keyword_case!(keyword_stonebreaker, "StoneBreaker", CardEffect::StoneBreaker);
keyword_case!(keyword_bonus_life, "bonus_life", CardEffect::BonusLife);
keyword_case!(keyword_extra_ball, "extra-ball", CardEffect::BonusLife);
keyword_case!(keyword_mirror_shot, "Mirror Shot", CardEffect::MirrorShot);
keyword_case!(keyword_score_boost, "score-boost", CardEffect::ScoreBoost);
keyword_case!(
    keyword_score_multiplier,
    "score-multiplier",
    CardEffect::ScoreBoost
);
keyword_case!(keyword_shot_speed, "shot_speed", CardEffect::ShotSpeed);
keyword_case!(keyword_quick_shot, "quick-shot", CardEffect::ShotSpeed);
keyword_case!(keyword_rescue, "RESCUE", CardEffect::Rescue);
keyword_case!(keyword_last_chance, "last chance", CardEffect::Rescue);
keyword_case!(keyword_recharge, "recharge", CardEffect::Recharge);
keyword_case!(
    keyword_energy_recharge,
    "energy_recharge",
    CardEffect::Recharge
);
keyword_case!(
    keyword_unknown,
    "magnet-field",
    CardEffect::Unknown("magnet-field".to_string())
);
keyword_case!(keyword_empty, "   ", CardEffect::Unknown(String::new()));

fn card(id: &str, key: &str) -> CardDefinition {
    CardDefinition::new(id, id, Rarity::Common, 1, key)
}

#[test]
fn mixed_infusions_follow_snapshot_order() {
    let catalog = CardCatalog::new(vec![
        card("water-a", "water-infusion"),
        card("water-b", "water-infusion"),
        card("flame", "flame-infusion"),
    ])
    .expect("catalog");
    let mut fx = EffectAccumulator::default();

    fx.rebuild(&catalog, &["water-a", "flame", "water-b"]);
    assert_eq!(fx.infusion(), Some(Infusion::Water));
    fx.after_first_shot_applied();
    assert_eq!(fx.infusion(), None);

    fx.rebuild(&catalog, &["flame", "water-a", "water-b"]);
    assert_eq!(fx.infusion(), Some(Infusion::Flame));
    fx.after_first_shot_applied();
    fx.after_first_shot_applied();
    assert_eq!(fx.infusion(), None);
}

#[test]
fn full_loadout_decodes_every_modifier_kind() {
    let catalog = CardCatalog::new(vec![
        card("storm", "storm-infusion"),
        card("breaker", "stone-breaker"),
        card("life", "bonus-life"),
        card("mirror", "mirror-shot"),
        card("score", "score-boost"),
        card("speed", "shot-speed"),
        card("rescue", "rescue"),
        card("recharge", "recharge"),
        card("future", "time-warp"),
    ])
    .expect("catalog");
    let ids: Vec<String> = catalog.iter().map(|c| c.id.clone()).collect();
    let mut fx = EffectAccumulator::default();
    fx.rebuild(&catalog, &ids);

    assert_eq!(fx.infusion(), Some(Infusion::Storm));
    assert_eq!(fx.stone_breaker_charges(), 1);
    assert_eq!(fx.bonus_lives(), 1);
    assert_eq!(fx.mirror_shots(), 1);
    assert!((fx.score_multiplier() - 1.5).abs() < 1e-9);
    assert!((fx.shot_speed_multiplier() - 1.25).abs() < 1e-9);
    assert!(fx.has_rescue());
    assert!(fx.has_recharge());

    fx.reset_all();
    assert_eq!(fx.infusion(), None);
    assert_eq!(fx.score_multiplier(), 1.0);
    assert!(!fx.has_recharge());
}
