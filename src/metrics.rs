//! Health metric calculation engine
//!
//! Pure, stateless calculations: BMI with categorization, BMR via the
//! Mifflin-St Jeor equation, activity-adjusted daily calories, and
//! goal-adjusted calorie targets.
//!
//! Every function here is a total, deterministic mapping from validated
//! inputs to results. Range validation is the caller's job (see the
//! `validation` module); these functions only promise not to panic for
//! finite positive inputs.
//!
//! Rounding rule: half away from zero (`f64::round`), applied to the
//! nearest integer for calorie values and to one decimal place for BMI.

use serde::{Deserialize, Serialize};

/// Minimum daily calorie target ever recommended, regardless of how
/// aggressive the requested deficit is.
pub const MIN_GOAL_CALORIES: i32 = 1200;

/// BMI classification per WHO thresholds, applied to the rounded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obesity,
}

impl BmiCategory {
    /// Display name used on the wire and in stored records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::NormalWeight => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obesity => "Obesity",
        }
    }

    /// UI color tag associated with the category.
    pub fn color(self) -> &'static str {
        match self {
            Self::Underweight => "blue",
            Self::NormalWeight => "green",
            Self::Overweight => "yellow",
            Self::Obesity => "red",
        }
    }

    /// Static guidance text shown alongside the category.
    pub fn description(self) -> &'static str {
        match self {
            Self::Underweight => {
                "You may need to gain weight. Consider consulting with a healthcare provider."
            }
            Self::NormalWeight => "You have a healthy weight. Keep up the good work!",
            Self::Overweight => {
                "Consider a balanced diet and regular exercise to reach a healthy weight."
            }
            Self::Obesity => {
                "Consider consulting with a healthcare provider for a personalized weight management plan."
            }
        }
    }
}

/// Result of a BMI calculation. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiResult {
    /// BMI rounded to one decimal place.
    pub bmi: f64,
    pub category: BmiCategory,
}

/// Gender as used by the Mifflin-St Jeor offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parse a wire value. Anything that is not exactly "Male" or
    /// "Female" uses the averaged offset, matching the engine's
    /// treatment of `Other`.
    pub fn parse(value: &str) -> Self {
        match value {
            "Male" => Self::Male,
            "Female" => Self::Female,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// Physical activity level with its fixed calorie multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    #[serde(rename = "Lightly active")]
    LightlyActive,
    #[serde(rename = "Moderately active")]
    ModeratelyActive,
    #[serde(rename = "Very active")]
    VeryActive,
    #[serde(rename = "Extra active")]
    ExtraActive,
}

impl ActivityLevel {
    /// Parse a wire value. Unrecognized values deliberately fall back
    /// to `Sedentary`, the most conservative multiplier; callers that
    /// want strict behavior must validate the string first.
    pub fn parse(value: &str) -> Self {
        match value {
            "Sedentary" => Self::Sedentary,
            "Lightly active" => Self::LightlyActive,
            "Moderately active" => Self::ModeratelyActive,
            "Very active" => Self::VeryActive,
            "Extra active" => Self::ExtraActive,
            _ => Self::Sedentary,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary",
            Self::LightlyActive => "Lightly active",
            Self::ModeratelyActive => "Moderately active",
            Self::VeryActive => "Very active",
            Self::ExtraActive => "Extra active",
        }
    }

    /// Fixed TDEE multiplier for this activity level.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
            Self::ExtraActive => 1.9,
        }
    }
}

/// Weight goal with its fixed daily calorie adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalType {
    #[serde(rename = "Lose weight")]
    LoseWeight,
    #[serde(rename = "Lose weight fast")]
    LoseWeightFast,
    #[serde(rename = "Gain weight")]
    GainWeight,
    #[serde(rename = "Gain weight fast")]
    GainWeightFast,
    Maintain,
}

impl GoalType {
    /// Parse a wire value. Unrecognized values contribute no
    /// adjustment, same as `Maintain`.
    pub fn parse(value: &str) -> Self {
        match value {
            "Lose weight" => Self::LoseWeight,
            "Lose weight fast" => Self::LoseWeightFast,
            "Gain weight" => Self::GainWeight,
            "Gain weight fast" => Self::GainWeightFast,
            _ => Self::Maintain,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoseWeight => "Lose weight",
            Self::LoseWeightFast => "Lose weight fast",
            Self::GainWeight => "Gain weight",
            Self::GainWeightFast => "Gain weight fast",
            Self::Maintain => "Maintain",
        }
    }

    /// Daily calorie delta applied on top of maintenance calories.
    pub fn adjustment(self) -> i32 {
        match self {
            Self::LoseWeight => -500,
            Self::LoseWeightFast => -1000,
            Self::GainWeight => 500,
            Self::GainWeightFast => 1000,
            Self::Maintain => 0,
        }
    }
}

/// Round to one decimal place, half away from zero.
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Calculate BMI from weight (kg) and height (cm).
///
/// `bmi = weight / (height_m)^2`, rounded to one decimal place. The
/// category is derived from the *rounded* value using half-open
/// intervals, so a value landing exactly on a threshold classifies
/// into the upper bucket.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> BmiResult {
    let height_m = height_cm / 100.0;
    let bmi = round_tenths(weight_kg / (height_m * height_m));

    let category = if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::NormalWeight
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obesity
    };

    BmiResult { bmi, category }
}

/// Calculate BMR (calories/day) using the Mifflin-St Jeor equation.
///
/// `base = 10*weight + 6.25*height - 5*age`, then a gender offset:
/// +5 for male, -161 for female, -78 (the midpoint) otherwise.
pub fn compute_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> i32 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);

    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
        Gender::Other => -78.0,
    };

    (base + offset).round() as i32
}

/// Scale BMR by the activity-level multiplier to estimate total daily
/// calorie needs.
pub fn compute_daily_calories(bmr: i32, activity_level: ActivityLevel) -> i32 {
    (f64::from(bmr) * activity_level.multiplier()).round() as i32
}

/// Apply the goal adjustment to maintenance calories, clamped so the
/// result never drops below [`MIN_GOAL_CALORIES`].
pub fn compute_goal_calories(base_calories: i32, goal_type: GoalType) -> i32 {
    (base_calories + goal_type.adjustment()).max(MIN_GOAL_CALORIES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_normal_weight() {
        let result = compute_bmi(70.0, 175.0);
        assert_eq!(result.bmi, 22.9);
        assert_eq!(result.category, BmiCategory::NormalWeight);
        assert_eq!(result.category.color(), "green");
    }

    #[test]
    fn test_bmi_underweight() {
        let result = compute_bmi(45.0, 170.0);
        assert_eq!(result.bmi, 15.6);
        assert_eq!(result.category, BmiCategory::Underweight);
        assert_eq!(result.category.color(), "blue");
    }

    #[test]
    fn test_bmi_boundaries_land_in_upper_bucket() {
        // 74 / 2.0^2 = 18.5 exactly
        assert_eq!(compute_bmi(74.0, 200.0).category, BmiCategory::NormalWeight);
        // 100 / 2.0^2 = 25.0 exactly
        assert_eq!(compute_bmi(100.0, 200.0).category, BmiCategory::Overweight);
        // 120 / 2.0^2 = 30.0 exactly
        assert_eq!(compute_bmi(120.0, 200.0).category, BmiCategory::Obesity);
    }

    #[test]
    fn test_bmi_rounds_half_away_from_zero() {
        // 89 / 2.0^2 = 22.25 exactly; 222.5 rounds to 223
        assert_eq!(compute_bmi(89.0, 200.0).bmi, 22.3);
    }

    #[test]
    fn test_bmi_just_below_boundary() {
        // 99.6 / 2.0^2 = 24.9, still normal weight
        let result = compute_bmi(99.6, 200.0);
        assert_eq!(result.bmi, 24.9);
        assert_eq!(result.category, BmiCategory::NormalWeight);
    }

    #[test]
    fn test_bmr_male() {
        // 10*70 + 6.25*175 - 5*25 + 5 = 1673.75
        assert_eq!(compute_bmr(70.0, 175.0, 25, Gender::Male), 1674);
    }

    #[test]
    fn test_bmr_female() {
        // 10*70 + 6.25*175 - 5*25 - 161 = 1507.75
        assert_eq!(compute_bmr(70.0, 175.0, 25, Gender::Female), 1508);
    }

    #[test]
    fn test_bmr_gender_offsets() {
        let male = compute_bmr(80.0, 180.0, 30, Gender::Male);
        let female = compute_bmr(80.0, 180.0, 30, Gender::Female);
        let other = compute_bmr(80.0, 180.0, 30, Gender::Other);

        // Male and female offsets differ by exactly 166; Other sits at
        // the midpoint.
        assert_eq!(male - female, 166);
        assert_eq!(other, male - 83);
    }

    #[test]
    fn test_bmr_rounds_half_up() {
        // 10*70 + 6.25*174 - 5*25 + 5 = 1667.5, exactly representable
        assert_eq!(compute_bmr(70.0, 174.0, 25, Gender::Male), 1668);
    }

    #[test]
    fn test_daily_calories_sedentary() {
        // 1674 * 1.2 = 2008.8
        assert_eq!(compute_daily_calories(1674, ActivityLevel::Sedentary), 2009);
    }

    #[test]
    fn test_daily_calories_all_levels_ordered() {
        let bmr = 1600;
        let levels = [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtraActive,
        ];

        let calories: Vec<i32> = levels
            .iter()
            .map(|l| compute_daily_calories(bmr, *l))
            .collect();

        assert_eq!(calories, vec![1920, 2200, 2480, 2760, 3040]);
    }

    #[test]
    fn test_activity_parse_unknown_defaults_to_sedentary() {
        assert_eq!(ActivityLevel::parse("couch potato"), ActivityLevel::Sedentary);
        assert_eq!(
            compute_daily_calories(1674, ActivityLevel::parse("couch potato")),
            compute_daily_calories(1674, ActivityLevel::Sedentary)
        );
    }

    #[test]
    fn test_goal_calories_deficit() {
        assert_eq!(compute_goal_calories(2009, GoalType::LoseWeight), 1509);
        assert_eq!(compute_goal_calories(2009, GoalType::LoseWeightFast), 1200);
    }

    #[test]
    fn test_goal_calories_surplus() {
        assert_eq!(compute_goal_calories(2009, GoalType::GainWeight), 2509);
        assert_eq!(compute_goal_calories(2009, GoalType::GainWeightFast), 3009);
    }

    #[test]
    fn test_goal_calories_floor() {
        // 1000 - 1000 = 0, clamped to the safety floor
        assert_eq!(compute_goal_calories(1000, GoalType::LoseWeightFast), 1200);
        assert_eq!(compute_goal_calories(0, GoalType::LoseWeightFast), 1200);
    }

    #[test]
    fn test_goal_parse_unknown_means_no_adjustment() {
        assert_eq!(GoalType::parse("bulk???"), GoalType::Maintain);
        assert_eq!(compute_goal_calories(2000, GoalType::parse("bulk???")), 2000);
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("Male"), Gender::Male);
        assert_eq!(Gender::parse("Female"), Gender::Female);
        assert_eq!(Gender::parse("Other"), Gender::Other);
        assert_eq!(Gender::parse("nonbinary"), Gender::Other);
    }

    #[test]
    fn test_idempotence() {
        let a = compute_bmi(83.7, 168.2);
        let b = compute_bmi(83.7, 168.2);
        assert_eq!(a.bmi.to_bits(), b.bmi.to_bits());
        assert_eq!(a.category, b.category);

        assert_eq!(
            compute_bmr(83.7, 168.2, 41, Gender::Female),
            compute_bmr(83.7, 168.2, 41, Gender::Female)
        );
    }

    #[test]
    fn test_wire_names_round_trip() {
        for level in [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtraActive,
        ] {
            assert_eq!(ActivityLevel::parse(level.as_str()), level);
        }

        for goal in [
            GoalType::LoseWeight,
            GoalType::LoseWeightFast,
            GoalType::GainWeight,
            GoalType::GainWeightFast,
            GoalType::Maintain,
        ] {
            assert_eq!(GoalType::parse(goal.as_str()), goal);
        }
    }
}
