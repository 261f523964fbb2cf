//! Sample prompts and help text shown by the CLI and the interactive session.

/// Prompt a fresh interactive session starts from.
pub const DEFAULT_PROMPT: &str = "Once upon a time, in a magical kingdom";

const SAMPLE_PROMPTS: [&str; 10] = [
    "In a mystical forest where ancient trees whispered secrets",
    "On a distant planet where two moons cast silver light",
    "In a steampunk city where gears and magic coexisted",
    "Deep in the ocean where mermaids guarded ancient treasures",
    "In a floating castle above the clouds where wizards studied",
    "In a cyberpunk city where AI and humans coexist",
    "On a space station orbiting a dying star",
    "In a magical school hidden in the mountains",
    "During the last day on Earth before evacuation",
    "In a world where books come to life",
];

/// Story openings that tend to produce visual scenes.
pub fn sample_prompts() -> &'static [&'static str] {
    &SAMPLE_PROMPTS
}

/// How to drive the generator.
pub fn usage_tips() -> &'static str {
    r#"How to use the story generator:

1. Enter a story prompt: write the opening of your story.
2. Adjust settings:
   - chapter length: how many tokens each chapter may use (50-300)
   - creativity: higher values give more unpredictable stories (0.1-1.5)
   - art style: visual style for generated images
3. Generate a chapter: creates the first chapter and its images.
4. Continue the story: adds chapters that pick up where the last one ended.
5. New story: reset and start over.

Art styles:
  fantasy       magical, mystical scenes
  realistic     photographic quality images
  anime         colorful, animated look
  watercolor    artistic, painted effect
  digital       modern, vibrant style
  oil_painting  classical, detailed artwork

Performance:
  - image generation may take 10-30 seconds per image
  - shorter chapters generate faster
  - lower creativity gives more coherent text

Story ideas:
  - "In a cyberpunk city where AI and humans coexist..."
  - "On a space station orbiting a dying star..."
  - "In a magical school hidden in the mountains..."
  - "During the last day on Earth before evacuation..."
  - "In a world where books come to life..."
"#
}

/// Common failure modes and what to do about them.
pub fn troubleshooting_info() -> &'static str {
    r#"Troubleshooting

Credentials
  - set HUGGINGFACE_API_TOKEN (or put it in .env) for authenticated requests
  - anonymous requests are heavily rate limited

Slow or failing generation
  - the first request to a cold model answers 503 while it loads; requests are
    retried with backoff
  - reduce chapter length for faster text
  - if no image model loads, placeholder images are written instead

Poor output
  - adjust creativity
  - try a different art style
  - make prompts more descriptive

Models
  - text: gpt2-medium by default, see [text] in fabulist.toml
  - image: the [image] candidates list is tried in order

Generated content may reflect biases of the underlying models; review it
before sharing.
"#
}
