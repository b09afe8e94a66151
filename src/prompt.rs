/// Shape the model is told to answer in. Mirrors [`crate::recipe::Recipe`].
const RECIPE_SCHEMA: &str = r#"{
  "title": "string, the name of the dish",
  "description": "string, a short description and history of the dish",
  "prepTime": "string, e.g. \"20 minutes\"",
  "cookTime": "string, e.g. \"1 hour\"",
  "servings": "integer greater than 0",
  "tips": [
    { "id": "string, unique within this recipe, e.g. \"tip-1\"", "text": "string, a tip for authenticity" }
  ],
  "steps": [
    { "number": "integer, starting at 1 and increasing by 1", "instruction": "string", "duration": "optional string, e.g. \"10 minutes\"" }
  ]
}"#;

/// Builds the single instruction sent to the generator for one request.
pub fn build_recipe_prompt(dish: &str, country: &str) -> String {
    format!(
        "Find an authentic recipe for {dish} from {country}.\n\
         Base every detail on real, reputable sources found through web search, \
         preferring cooks and publications from {country}.\n\
         \n\
         Respond with exactly one JSON object and nothing else: no markdown, no code fences, \
         no commentary before or after it. The object must match this schema:\n\
         {RECIPE_SCHEMA}\n\
         \n\
         Include the ingredient quantities inside the step instructions where they are used. \
         List the steps in cooking order."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_dish_and_country_verbatim() {
        let prompt = build_recipe_prompt("Pão de Queijo", "Brazil");
        assert!(prompt.starts_with("Find an authentic recipe for Pão de Queijo from Brazil."));
        assert!(prompt.contains("publications from Brazil"));
    }

    #[test]
    fn demands_json_matching_the_recipe_fields() {
        let prompt = build_recipe_prompt("Sushi", "Japan");
        assert!(prompt.contains("exactly one JSON object"));
        assert!(prompt.contains("web search"));
        for field in [
            "\"title\"",
            "\"description\"",
            "\"prepTime\"",
            "\"cookTime\"",
            "\"servings\"",
            "\"tips\"",
            "\"steps\"",
            "\"number\"",
            "\"instruction\"",
            "\"duration\"",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
    }
}
