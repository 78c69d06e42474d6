use medipredict::session::Risk;

/// Window title for the recommendations view.
pub const ADVICE_TITLE: &str = "Recommendations";

const DIET_PLAN: &str = "\
DIET PLAN FOR DIABETIC MANAGEMENT

Nutrient Distribution:
- Carbohydrates (50%): Whole grains, vegetables, fruits, legumes. Avoid refined sugar.
- Proteins (25%): Lean meat, poultry, fish, eggs, tofu, beans.
- Fats (25%): Avocados, nuts, seeds, olive oil.

Recommended Foods:
- Leafy greens (Spinach, Kale)
- Fatty fish (Salmon, Mackerel)
- Berries and citrus fruits
- Whole grains (Quinoa, Brown Rice)";

const HEALTH_TIPS: &str = "\
HEALTH TIPS FOR PREVENTION

Prevention Strategies:
1. Physical Activity
   - Aim for at least 150 minutes of moderate aerobic activity per week.

2. Healthy Eating
   - Focus on fiber-rich foods.
   - Limit sugary drinks and processed snacks.

3. Regular Checkups
   - Monitor glucose levels and blood pressure periodically.
   - Maintain a healthy weight.";

pub fn advice_text(risk: Risk) -> &'static str {
    match risk {
        Risk::High => DIET_PLAN,
        Risk::Low => HEALTH_TIPS,
    }
}

/// Caption for the recommendations button once a prediction exists.
pub fn advice_caption(risk: Risk) -> &'static str {
    match risk {
        Risk::High => "View Diet Plan",
        Risk::Low => "View Health Tips",
    }
}
