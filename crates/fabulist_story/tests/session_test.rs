mod test_utils;

use fabulist_core::{ArtStyle, DEFAULT_PROMPT};
use fabulist_error::{FabulistErrorKind, StoryErrorKind};
use fabulist_story::{DEFAULT_IMAGE_MODELS, Illustrator, StoryGenerator, StorySession};
use test_utils::{ImageBehavior, MockImageDriver, MockTextDriver};

const CHAPTER_ONE: &str =
    "The princess looked at the golden tower. Nobody had climbed it in years. She began";
const CHAPTER_TWO: &str = "Inside, the stairs were cold. A bright lantern stood on a step.";

async fn session(
    texts: &[&str],
) -> (
    StorySession<MockTextDriver, MockImageDriver>,
    MockTextDriver,
    MockImageDriver,
) {
    let text = MockTextDriver::new_texts(texts);
    let image = MockImageDriver::new(&[DEFAULT_IMAGE_MODELS[0]], ImageBehavior::Png);
    let mut illustrator = Illustrator::new(image.clone());
    illustrator.load_model().await;
    let session = StorySession::new(StoryGenerator::new(text.clone()), illustrator);
    (session, text, image)
}

fn story_kind(err: &fabulist_error::FabulistError) -> Option<StoryErrorKind> {
    match err.kind() {
        FabulistErrorKind::Story(e) => Some(e.kind.clone()),
        _ => None,
    }
}

#[tokio::test]
async fn test_new_session_uses_default_prompt() {
    let (session, _, _) = session(&[]).await;
    assert_eq!(session.prompt(), DEFAULT_PROMPT);
    assert_eq!(session.prompt(), "Once upon a time, in a magical kingdom");
    assert!(session.is_empty());
    assert_eq!(session.active_image_model(), Some(DEFAULT_IMAGE_MODELS[0]));
}

#[tokio::test]
async fn test_generate_appends_and_moves_prompt() {
    let (mut session, text, _) = session(&[CHAPTER_ONE, CHAPTER_TWO]).await;

    let chapter = session.generate().await.unwrap();
    assert_eq!(chapter.number, 1);
    assert_eq!(chapter.prompt, DEFAULT_PROMPT);

    assert_eq!(session.prompt(), "Nobody had climbed it in years.");
    assert_eq!(session.images().len(), 1);
    assert_eq!(session.images()[0].chapter, 1);

    let chapter = session.continue_story().await.unwrap();
    assert_eq!(chapter.number, 2);
    assert_eq!(chapter.prompt, "Nobody had climbed it in years.");

    assert_eq!(text.prompts()[1], "Nobody had climbed it in years.");
    assert_eq!(session.chapter_count(), 2);
    assert_eq!(session.images().last().map(|i| i.chapter), Some(2));
    assert!(session.full_text().contains("**Chapter 2**\nInside, the stairs"));
}

#[tokio::test]
async fn test_continue_on_empty_session_is_rejected() {
    let (mut session, text, _) = session(&[CHAPTER_ONE]).await;

    let err = session.continue_story().await.unwrap_err();
    assert_eq!(story_kind(&err), Some(StoryErrorKind::NothingToContinue));
    assert!(text.prompts().is_empty());
}

#[tokio::test]
async fn test_empty_prompt_is_rejected() {
    let (mut session, _, _) = session(&[CHAPTER_ONE]).await;
    session.set_prompt("  ");

    let err = session.generate().await.unwrap_err();
    assert_eq!(story_kind(&err), Some(StoryErrorKind::EmptyPrompt));
    assert!(session.is_empty());
}

#[tokio::test]
async fn test_reset_clears_everything() {
    let (mut session, _, _) = session(&[CHAPTER_ONE]).await;
    session.set_chapter_length(250).unwrap();
    session.generate().await.unwrap();

    session.reset();

    assert!(session.is_empty());
    assert!(session.images().is_empty());
    assert_eq!(session.chapter_count(), 0);
    assert_eq!(session.full_text(), "");
    assert_eq!(session.prompt(), DEFAULT_PROMPT);
    assert_eq!(*session.settings().chapter_length(), 250);
}

#[tokio::test]
async fn test_images_can_be_disabled() {
    let (session, _, image) = session(&[CHAPTER_ONE]).await;
    let mut session = session.with_images(false);

    session.generate().await.unwrap();
    assert!(session.images().is_empty());
    assert!(image.generate_calls().is_empty());
}

#[tokio::test]
async fn test_settings_flow_into_requests() {
    let (mut session, text, image) = session(&[CHAPTER_ONE]).await;
    session.set_chapter_length(100).unwrap();
    session.set_creativity(1.1).unwrap();
    session.set_art_style(ArtStyle::Anime).unwrap();

    session.generate().await.unwrap();

    let request = &text.requests()[0];
    assert_eq!(*request.max_new_tokens(), 100);
    assert_eq!(*request.temperature(), 1.1);
    assert_eq!(image.generate_calls()[0].1.style(), "anime style, colorful, detailed");
}

#[tokio::test]
async fn test_invalid_settings_are_rejected_and_kept() {
    let (mut session, _, _) = session(&[]).await;

    assert!(session.set_chapter_length(10).is_err());
    assert!(session.set_creativity(2.0).is_err());
    assert!(session.set_art_style(ArtStyle::Custom("  ".to_string())).is_err());

    assert_eq!(*session.settings().chapter_length(), 150);
    assert_eq!(*session.settings().creativity(), 0.8);
    assert_eq!(session.settings().art_style(), &ArtStyle::Fantasy);
}

#[tokio::test]
async fn test_to_story_snapshot() {
    let (mut session, _, _) = session(&[CHAPTER_ONE]).await;
    assert!(session.to_story().is_err());

    session.generate().await.unwrap();
    let story = session.to_story().unwrap();

    assert_eq!(story.metadata.initial_prompt, DEFAULT_PROMPT);
    assert_eq!(story.metadata.num_chapters, 1);
    assert_eq!(story.chapters.len(), 1);
    assert_eq!(story.images.len(), 1);
    assert_eq!(story.full_text(), session.full_text());
}

#[tokio::test]
async fn test_text_failure_leaves_session_unchanged() {
    let (mut session, _, _) = session(&[CHAPTER_ONE]).await;
    session.generate().await.unwrap();
    let prompt = session.prompt().to_string();

    assert!(session.continue_story().await.is_err());
    assert_eq!(session.chapter_count(), 1);
    assert_eq!(session.prompt(), prompt);
}
