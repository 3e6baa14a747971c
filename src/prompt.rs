use crate::metadata::ScenePrompt;

// Fixed traits, consistent wording and a hierarchical layout keep the character
// the same across every generated post image.
pub const CHARACTER_DESCRIPTION: &str = "ILLUSTRATION STYLE (FIXED):
- Hand-drawn cartoon/comic style with warm inviting aesthetic
- Flat colors with bold black outlines
- Friendly approachable art style similar to children's book illustration

PRIMARY CHARACTER IDENTIFIERS (MUST MATCH EXACTLY IN EVERY IMAGE):
- Middle-aged man with long flowing brown hair (shoulder-length, wavy)
- Full bushy salt-and-pepper beard (mixed gray and brown, thick and well-groomed)
- Round friendly face with warm smile
- Warm peachy skin tone (#DCC6BE)

SECONDARY CHARACTER IDENTIFIERS (MUST BE CONSISTENT):
- Two-tone gray plaid housecoat (light gray and dark charcoal gray checkered pattern - MUST BE GRAY, NOT GREEN OR BROWN)
- Matching plaid fabric tie-belt (waistband) around the waist
- Knee-length housecoat with simple collar
- Barefoot with simple brown leather sandals on feet
- Holding a tall wooden walking stick in right hand (light brown/tan wood #BB8867, simple design, reaches to shoulder height)

CHARACTER EXPRESSION (FIXED):
- Friendly, contemplative, peaceful expression
- Gentle eyes
- Slight smile or neutral pleasant expression

REQUIRED BACKGROUND TEMPLATE (MUST INCLUDE IN EVERY IMAGE):
- Happy smiling sun with cartoon face in the sky (bright yellow/orange #FFB347, friendly warm expression, simple round face with eyes and smile)
- Rolling hills landscape in background (golden/tan #D4A574 with patches of green vegetation)
- Teal-to-green gradient sky (#6B9D9E to #8BB28C)
- Natural outdoor setting with warm welcoming atmosphere";

pub fn build_prompt(scene: &ScenePrompt) -> String {
    format!("{}\n\nSCENE: {}", CHARACTER_DESCRIPTION, scene.as_str())
}
