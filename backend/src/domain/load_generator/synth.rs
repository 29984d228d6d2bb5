//! Random telemetry for one load-generator tick.
//!
//! Ranges mimic a small film and battery-separator plant. Equipment hours
//! and the notional material stock are derived so each record is internally
//! consistent.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::ports::{StatSubmission, StatSubmitError};
use crate::domain::{
    DailyProductionFields, EnergyFields, EquipmentFields, MaterialUsageFields, QualityFields,
    StatDate, StatDraft,
};

/// Product lines reported by production and quality records.
pub const PRODUCT_TYPES: [&str; 5] = ["PE膜", "PVC压延膜", "锂电池隔膜", "高效助剂", "彩印包装材料"];
/// Shift labels.
pub const SHIFTS: [&str; 2] = ["白班", "夜班"];
/// Materials reported by usage records.
pub const MATERIAL_NAMES: [&str; 6] = [
    "PE颗粒",
    "PVC颗粒",
    "锂电池隔膜基膜",
    "功能性助剂",
    "彩印包装油墨",
    "无纺布",
];
/// Hours in a reporting day.
pub const HOURS_PER_DAY: f64 = 24.0;
/// Stock each usage record is measured against.
pub const NOTIONAL_STOCK_KG: f64 = 10_000.0;

/// One synthetic record per telemetry family.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticBatch {
    /// Daily production record.
    pub daily: StatDraft<DailyProductionFields>,
    /// Energy record.
    pub energy: StatDraft<EnergyFields>,
    /// Equipment record.
    pub equipment: StatDraft<EquipmentFields>,
    /// Material usage record.
    pub material: StatDraft<MaterialUsageFields>,
    /// Quality record.
    pub quality: StatDraft<QualityFields>,
}

impl SyntheticBatch {
    /// Generate a batch dated `date`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, date: &StatDate) -> Self {
        Self {
            daily: StatDraft::new(date.clone(), daily_production(rng)),
            energy: StatDraft::new(date.clone(), energy(rng)),
            equipment: StatDraft::new(date.clone(), equipment(rng)),
            material: StatDraft::new(date.clone(), material_usage(rng)),
            quality: StatDraft::new(date.clone(), quality(rng)),
        }
    }

    /// Encode the batch as five submissions.
    pub fn into_submissions(self) -> Result<Vec<StatSubmission>, StatSubmitError> {
        Ok(vec![
            StatSubmission::from_draft(&self.daily)?,
            StatSubmission::from_draft(&self.energy)?,
            StatSubmission::from_draft(&self.equipment)?,
            StatSubmission::from_draft(&self.material)?,
            StatSubmission::from_draft(&self.quality)?,
        ])
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn float_in<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    round2(rng.gen_range(min..max))
}

fn pick<R: Rng + ?Sized>(rng: &mut R, options: &[&str]) -> Option<String> {
    options.choose(rng).map(|value| (*value).to_owned())
}

fn daily_production<R: Rng + ?Sized>(rng: &mut R) -> DailyProductionFields {
    DailyProductionFields {
        product_type: pick(rng, &PRODUCT_TYPES),
        total_output: Some(rng.gen_range(100..=1000)),
        defective_rate: Some(float_in(rng, 0.0, 5.0)),
        machine_count: Some(rng.gen_range(1..=10)),
        shift: pick(rng, &SHIFTS),
    }
}

fn energy<R: Rng + ?Sized>(rng: &mut R) -> EnergyFields {
    EnergyFields {
        electricity: Some(float_in(rng, 50.0, 100.0)),
        water: Some(float_in(rng, 1.0, 10.0)),
        gas: Some(float_in(rng, 1.0, 10.0)),
        area_output: Some(f64::from(rng.gen_range(1_u8..=100))),
    }
}

fn equipment<R: Rng + ?Sized>(rng: &mut R) -> EquipmentFields {
    let run_time = float_in(rng, 1.0, HOURS_PER_DAY);
    let code: u16 = rng.gen_range(1..=999);
    EquipmentFields {
        equipment_code: Some(format!("EQP-{code:03}")),
        run_time: Some(run_time),
        downtime: Some(round2(HOURS_PER_DAY - run_time)),
        fault_count: Some(rng.gen_range(0..=5)),
        utilization_rate: Some(round2(run_time / HOURS_PER_DAY * 100.0)),
    }
}

fn material_usage<R: Rng + ?Sized>(rng: &mut R) -> MaterialUsageFields {
    let used_amount = f64::from(rng.gen_range(10_u8..=100));
    MaterialUsageFields {
        material_name: pick(rng, &MATERIAL_NAMES),
        used_amount: Some(used_amount),
        stock_remaining: Some(NOTIONAL_STOCK_KG - used_amount),
    }
}

fn quality<R: Rng + ?Sized>(rng: &mut R) -> QualityFields {
    let sample_count: i64 = rng.gen_range(90..=100);
    QualityFields {
        product_type: pick(rng, &PRODUCT_TYPES),
        sample_count: Some(sample_count),
        qualified_count: Some(rng.gen_range(90..=sample_count)),
        avg_thickness: Some(float_in(rng, 10.0, 20.0)),
        avg_porosity: Some(float_in(rng, 40.0, 50.0)),
        avg_strength: Some(float_in(rng, 30.0, 40.0)),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::rstest;

    use super::*;
    use crate::domain::StatKind;

    fn batch(seed: u64) -> SyntheticBatch {
        let mut rng = SmallRng::seed_from_u64(seed);
        SyntheticBatch::generate(&mut rng, &StatDate::new("2024-07-01").expect("valid date"))
    }

    fn has_two_decimals(value: f64) -> bool {
        ((value * 100.0).round() - value * 100.0).abs() < 1e-6
    }

    #[rstest]
    fn derived_equipment_hours_are_consistent() {
        for seed in 0..200 {
            let fields = batch(seed).equipment.fields;
            let run_time = fields.run_time.expect("run time");
            let downtime = fields.downtime.expect("downtime");
            let utilisation = fields.utilization_rate.expect("utilisation");
            assert!((1.0..=HOURS_PER_DAY).contains(&run_time));
            assert!((downtime - (HOURS_PER_DAY - run_time)).abs() < 0.011);
            assert!((utilisation - run_time / HOURS_PER_DAY * 100.0).abs() < 0.011);
            assert!(has_two_decimals(run_time));
        }
    }

    #[rstest]
    fn equipment_code_is_zero_padded() {
        for seed in 0..200 {
            let code = batch(seed).equipment.fields.equipment_code.expect("code");
            let digits = code.strip_prefix("EQP-").expect("prefix");
            assert_eq!(digits.len(), 3);
            let number: u16 = digits.parse().expect("numeric suffix");
            assert!((1..=999).contains(&number));
        }
    }

    #[rstest]
    fn qualified_never_exceeds_sampled() {
        for seed in 0..200 {
            let fields = batch(seed).quality.fields;
            let sampled = fields.sample_count.expect("sample count");
            let qualified = fields.qualified_count.expect("qualified count");
            assert!((90..=100).contains(&sampled));
            assert!((90..=sampled).contains(&qualified));
        }
    }

    #[rstest]
    fn stock_remaining_is_measured_against_notional_stock() {
        for seed in 0..200 {
            let fields = batch(seed).material.fields;
            let used = fields.used_amount.expect("used amount");
            assert!((10.0..=100.0).contains(&used));
            assert_eq!(fields.stock_remaining, Some(NOTIONAL_STOCK_KG - used));
            let name = fields.material_name.expect("material name");
            assert!(MATERIAL_NAMES.contains(&name.as_str()));
        }
    }

    #[rstest]
    fn production_values_stay_in_range() {
        for seed in 0..200 {
            let fields = batch(seed).daily.fields;
            assert!((100..=1000).contains(&fields.total_output.expect("output")));
            assert!((1..=10).contains(&fields.machine_count.expect("machines")));
            assert!((0.0..=5.0).contains(&fields.defective_rate.expect("rate")));
            let shift = fields.shift.expect("shift");
            assert!(SHIFTS.contains(&shift.as_str()));
        }
    }

    #[rstest]
    fn submissions_cover_every_family_with_shared_date() {
        let submissions = batch(7).into_submissions().expect("encodes");
        let kinds: Vec<_> = submissions.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, StatKind::ALL.to_vec());
        for submission in submissions {
            assert_eq!(submission.body["date"], "2024-07-01");
        }
    }
}
