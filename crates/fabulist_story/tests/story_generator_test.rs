mod test_utils;

use fabulist_error::{FabulistErrorKind, HuggingFaceErrorKind, StoryErrorKind};
use fabulist_story::StoryGenerator;
use test_utils::{MockResponse, MockTextDriver};

fn story_error(err: &fabulist_error::FabulistError) -> Option<&StoryErrorKind> {
    match err.kind() {
        FabulistErrorKind::Story(e) => Some(&e.kind),
        _ => None,
    }
}

#[tokio::test]
async fn test_echoed_prompt_is_stripped() {
    let driver = MockTextDriver::new_sequence(vec![MockResponse::Echo(
        " the dragon woke.  ".to_string(),
    )]);
    let generator = StoryGenerator::new(driver);

    let text = generator
        .generate_chapter("In the mountain cave", 150, 0.8)
        .await
        .unwrap();
    assert_eq!(text, "the dragon woke.");
}

#[tokio::test]
async fn test_request_carries_length_and_temperature() {
    let driver = MockTextDriver::new_texts(&["Something happened."]);
    let generator = StoryGenerator::new(driver.clone());

    generator.generate_chapter("Begin", 200, 1.2).await.unwrap();

    let requests = driver.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(*requests[0].max_new_tokens(), 200);
    assert_eq!(*requests[0].temperature(), 1.2);
}

#[tokio::test]
async fn test_blank_prompt_is_rejected() {
    let driver = MockTextDriver::new_texts(&["unused"]);
    let generator = StoryGenerator::new(driver.clone());

    let err = generator.generate_chapter("   ", 150, 0.8).await.unwrap_err();
    assert_eq!(story_error(&err), Some(&StoryErrorKind::EmptyPrompt));
    assert!(driver.prompts().is_empty(), "backend should not be called");
}

#[tokio::test]
async fn test_output_that_only_echoes_is_an_error() {
    let driver = MockTextDriver::new_sequence(vec![MockResponse::Echo("   ".to_string())]);
    let generator = StoryGenerator::new(driver);

    let err = generator.generate_chapter("Hello", 150, 0.8).await.unwrap_err();
    assert!(matches!(
        story_error(&err),
        Some(StoryErrorKind::EmptyChapter(_))
    ));
}

#[tokio::test]
async fn test_backend_error_propagates() {
    let driver = MockTextDriver::new_sequence(vec![MockResponse::Error(
        HuggingFaceErrorKind::Api {
            status: 401,
            message: "unauthorized".to_string(),
        },
    )]);
    let generator = StoryGenerator::new(driver);

    let err = generator.generate_chapter("Hello", 150, 0.8).await.unwrap_err();
    assert!(matches!(err.kind(), FabulistErrorKind::Models(_)));
}

#[tokio::test]
async fn test_complete_story_chains_chapters() {
    let driver = MockTextDriver::new_texts(&[
        "The castle stood dark against the sky. Guards paced the walls. A horn sounded.",
        "Far away, a girl walked into the silver forest. She was not afraid. Not yet",
        "The end came quietly.",
    ]);
    let generator = StoryGenerator::new(driver.clone());

    let story = generator
        .generate_complete_story("Once upon a time", 3, 150, 0.8)
        .await
        .unwrap();

    let numbers: Vec<u32> = story.chapters.iter().map(|c| c.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    assert_eq!(
        driver.prompts(),
        vec![
            "Once upon a time".to_string(),
            "Guards paced the walls. A horn sounded. Meanwhile,".to_string(),
            "Far away, a girl walked into the silver forest. She was not afraid. Meanwhile,"
                .to_string(),
        ]
    );
    assert_eq!(story.chapters[1].prompt, driver.prompts()[1]);

    assert_eq!(
        story.chapters[0].scene_descriptions,
        vec!["The castle stood dark against the sky"]
    );
    assert_eq!(story.metadata.num_chapters, 3);
    assert!(story.full_text().starts_with("\n\n**Chapter 1**\nThe castle"));
    assert!(story.images.is_empty());
}

#[tokio::test]
async fn test_zero_chapters_is_rejected() {
    let driver = MockTextDriver::new_texts(&[]);
    let generator = StoryGenerator::new(driver);

    let err = generator
        .generate_complete_story("Once upon a time", 0, 150, 0.8)
        .await
        .unwrap_err();
    assert_eq!(story_error(&err), Some(&StoryErrorKind::NoChapters));
}

#[tokio::test]
async fn test_failure_mid_story_stops_generation() {
    let driver = MockTextDriver::new_texts(&["The first chapter ended well."]);
    let generator = StoryGenerator::new(driver.clone());

    let result = generator
        .generate_complete_story("Once upon a time", 3, 150, 0.8)
        .await;
    assert!(result.is_err());
    assert_eq!(driver.prompts().len(), 2);
}

#[tokio::test]
async fn test_load_error_propagates() {
    let driver = MockTextDriver::new_texts(&[])
        .with_load_error(HuggingFaceErrorKind::ModelUnavailable("gpt2-medium".to_string()));
    let generator = StoryGenerator::new(driver);

    assert!(generator.load().await.is_err());
}
