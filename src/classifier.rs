use crate::models::Category;

/// Lower bound of the Normal band
pub const NORMAL_MIN: f64 = 18.5;
/// Lower bound of the Overweight band
pub const OVERWEIGHT_MIN: f64 = 25.0;
/// Lower bound of the Obese band
pub const OBESE_MIN: f64 = 30.0;

/// Classify a BMI value
///
/// Bands are closed below:
/// - Underweight: < 18.5
/// - Normal: 18.5 - 24.99
/// - Overweight: 25 - 29.99
/// - Obese: >= 30
///
/// NaN and positive infinity fail every comparison and land in `Obese`.
pub fn classify(bmi: f64) -> Category {
    if bmi < NORMAL_MIN {
        Category::Underweight
    } else if bmi < OVERWEIGHT_MIN {
        Category::Normal
    } else if bmi < OBESE_MIN {
        Category::Overweight
    } else {
        Category::Obese
    }
}
