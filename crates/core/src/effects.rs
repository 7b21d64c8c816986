use crate::{CardCatalog, CardEffect, EffectTuning, Infusion};

/// Gameplay modifiers decoded from the active snapshot.
///
/// Rebuilt from scratch on every level start or restart. Gameplay systems read the
/// getters and spend charges through the `try_consume_*` methods.
#[derive(Debug, Clone)]
pub struct EffectAccumulator {
    tuning: EffectTuning,
    infusion: Option<Infusion>,
    stone_breaker_charges: u32,
    bonus_lives: u32,
    mirror_shots: u32,
    score_multiplier: f64,
    shot_speed_multiplier: f64,
    rescue: bool,
    recharge: bool,
}

impl Default for EffectAccumulator {
    fn default() -> Self {
        Self::new(EffectTuning::default())
    }
}

impl EffectAccumulator {
    pub fn new(tuning: EffectTuning) -> Self {
        Self {
            tuning,
            infusion: None,
            stone_breaker_charges: 0,
            bonus_lives: 0,
            mirror_shots: 0,
            score_multiplier: 1.0,
            shot_speed_multiplier: 1.0,
            rescue: false,
            recharge: false,
        }
    }

    pub fn tuning(&self) -> &EffectTuning {
        &self.tuning
    }

    pub fn reset_all(&mut self) {
        self.infusion = None;
        self.stone_breaker_charges = 0;
        self.bonus_lives = 0;
        self.mirror_shots = 0;
        self.score_multiplier = 1.0;
        self.shot_speed_multiplier = 1.0;
        self.rescue = false;
        self.recharge = false;
    }

    /// Accumulate the effects of `ids` on top of the current state. Call
    /// [`reset_all`](Self::reset_all) first, or use [`rebuild`](Self::rebuild).
    /// Ids missing from the catalog and unknown effect keys are skipped.
    pub fn apply_from_active_snapshot<S: AsRef<str>>(&mut self, catalog: &CardCatalog, ids: &[S]) {
        for id in ids {
            let Some(card) = catalog.lookup(id.as_ref()) else {
                tracing::debug!(id = id.as_ref(), "active card missing from catalog");
                continue;
            };
            self.apply_effect(card.effect());
        }
        self.score_multiplier = self.score_multiplier.max(1.0);
        self.shot_speed_multiplier = self.shot_speed_multiplier.max(1.0);
    }

    pub fn rebuild<S: AsRef<str>>(&mut self, catalog: &CardCatalog, ids: &[S]) {
        self.reset_all();
        self.apply_from_active_snapshot(catalog, ids);
    }

    fn apply_effect(&mut self, effect: CardEffect) {
        match effect {
            CardEffect::Infusion(element) => {
                // First infusion in snapshot order wins.
                if self.infusion.is_none() {
                    self.infusion = Some(element);
                }
            }
            CardEffect::StoneBreaker => {
                self.stone_breaker_charges += self.tuning.stone_breaker_per_card;
            }
            CardEffect::BonusLife => self.bonus_lives += self.tuning.bonus_lives_per_card,
            CardEffect::MirrorShot => self.mirror_shots += self.tuning.mirror_shots_per_card,
            CardEffect::ScoreBoost => self.score_multiplier *= self.tuning.score_factor,
            CardEffect::ShotSpeed => self.shot_speed_multiplier *= self.tuning.shot_speed_factor,
            CardEffect::Rescue => self.rescue = true,
            CardEffect::Recharge => self.recharge = true,
            CardEffect::Unknown(_) => {}
        }
    }

    pub fn infusion(&self) -> Option<Infusion> {
        self.infusion
    }

    /// The infusion only flavors the first shot of the level.
    pub fn after_first_shot_applied(&mut self) {
        self.infusion = None;
    }

    pub fn stone_breaker_charges(&self) -> u32 {
        self.stone_breaker_charges
    }

    pub fn bonus_lives(&self) -> u32 {
        self.bonus_lives
    }

    pub fn mirror_shots(&self) -> u32 {
        self.mirror_shots
    }

    pub fn score_multiplier(&self) -> f64 {
        self.score_multiplier
    }

    pub fn shot_speed_multiplier(&self) -> f64 {
        self.shot_speed_multiplier
    }

    pub fn has_rescue(&self) -> bool {
        self.rescue
    }

    pub fn has_recharge(&self) -> bool {
        self.recharge
    }

    pub fn try_consume_stone_breaker(&mut self) -> bool {
        take_charge(&mut self.stone_breaker_charges)
    }

    pub fn try_consume_mirror_shot(&mut self) -> bool {
        take_charge(&mut self.mirror_shots)
    }

    pub fn try_consume_bonus_life(&mut self) -> bool {
        take_charge(&mut self.bonus_lives)
    }

    /// Once per level.
    pub fn try_consume_rescue(&mut self) -> bool {
        std::mem::replace(&mut self.rescue, false)
    }
}

fn take_charge(counter: &mut u32) -> bool {
    if *counter == 0 {
        return false;
    }
    *counter -= 1;
    true
}
