mod test_utils;

use fabulist_config::FabulistConfig;
use fabulist_story::{BACKGROUND, DEFAULT_IMAGE_MODELS, Illustrator};
use test_utils::{ImageBehavior, MockImageDriver};
use test_utils::mock_drivers::MOCK_PIXEL;

const STYLE: &str = "watercolor painting, artistic";

#[tokio::test]
async fn test_fallback_stops_at_first_loadable_model() {
    let driver = MockImageDriver::new(
        &["CompVis/stable-diffusion-v1-4", "stabilityai/stable-diffusion-2-1-base"],
        ImageBehavior::Png,
    );
    let mut illustrator = Illustrator::new(driver.clone());

    let loaded = illustrator.load_model().await.map(str::to_string);

    assert_eq!(loaded.as_deref(), Some("CompVis/stable-diffusion-v1-4"));
    assert!(illustrator.is_model_loaded());
    assert_eq!(
        driver.load_attempts(),
        vec![
            DEFAULT_IMAGE_MODELS[0].to_string(),
            DEFAULT_IMAGE_MODELS[1].to_string()
        ]
    );
}

#[tokio::test]
async fn test_no_loadable_model_leaves_flag_unset() {
    let driver = MockImageDriver::new(&[], ImageBehavior::Png);
    let mut illustrator = Illustrator::new(driver.clone());

    assert!(illustrator.load_model().await.is_none());
    assert!(!illustrator.is_model_loaded());
    assert_eq!(driver.load_attempts().len(), DEFAULT_IMAGE_MODELS.len());
}

#[tokio::test]
async fn test_placeholder_when_no_model_loaded() {
    let driver = MockImageDriver::new(&[], ImageBehavior::Png);
    let illustrator = Illustrator::new(driver.clone());

    let image = illustrator
        .generate_image(1, 1, "A dark forest at night", STYLE)
        .await
        .unwrap();

    assert!(image.placeholder);
    assert_eq!(image.image.dimensions(), (512, 512));
    assert_eq!(*image.image.get_pixel(0, 0), BACKGROUND);
    assert!(driver.generate_calls().is_empty());
}

#[tokio::test]
async fn test_placeholder_when_inference_fails() {
    let driver = MockImageDriver::new(&[DEFAULT_IMAGE_MODELS[0]], ImageBehavior::Error);
    let mut illustrator = Illustrator::new(driver.clone());
    illustrator.load_model().await;

    let image = illustrator
        .generate_image(2, 1, "A golden sun over the ocean", STYLE)
        .await
        .unwrap();

    assert!(image.placeholder);
    assert_eq!(image.chapter, 2);
    assert_eq!(driver.generate_calls().len(), 1);
}

#[tokio::test]
async fn test_placeholder_when_response_is_not_an_image() {
    let driver = MockImageDriver::new(&[DEFAULT_IMAGE_MODELS[0]], ImageBehavior::Garbage);
    let mut illustrator = Illustrator::new(driver);
    illustrator.load_model().await;

    let image = illustrator
        .generate_image(1, 1, "The silver moon rose", STYLE)
        .await
        .unwrap();
    assert!(image.placeholder);
}

#[tokio::test]
async fn test_model_output_is_decoded() {
    let driver = MockImageDriver::new(&[DEFAULT_IMAGE_MODELS[0]], ImageBehavior::Png);
    let mut illustrator = Illustrator::new(driver.clone());
    illustrator.load_model().await;

    let image = illustrator
        .generate_image(1, 2, "An ancient castle on a mountain", STYLE)
        .await
        .unwrap();

    assert!(!image.placeholder);
    assert_eq!(*image.image.get_pixel(0, 0), MOCK_PIXEL);

    let calls = driver.generate_calls();
    assert_eq!(calls[0].0, DEFAULT_IMAGE_MODELS[0]);
    assert_eq!(
        calls[0].1.enhanced_prompt(),
        format!("An ancient castle on a mountain, {}", STYLE)
    );
}

#[tokio::test]
async fn test_negative_prompt_reaches_the_driver() {
    let driver = MockImageDriver::new(&[DEFAULT_IMAGE_MODELS[0]], ImageBehavior::Png);
    let mut illustrator = Illustrator::new(driver.clone());
    illustrator.load_model().await;
    illustrator.set_negative_prompt("modern buildings, cars");

    illustrator
        .generate_image(1, 1, "A knight crossing a stone bridge", STYLE)
        .await
        .unwrap();

    assert_eq!(illustrator.negative_prompt(), "modern buildings, cars");
    assert_eq!(
        driver.generate_calls()[0].1.negative_prompt(),
        "modern buildings, cars"
    );
}

#[tokio::test]
async fn test_story_images_are_numbered_per_chapter() {
    let driver = MockImageDriver::new(&[DEFAULT_IMAGE_MODELS[0]], ImageBehavior::Png);
    let mut illustrator = Illustrator::new(driver);
    illustrator.load_model().await;

    let scenes = vec![
        "The forest was dark".to_string(),
        "A castle appeared on the hill".to_string(),
    ];
    let images = illustrator.generate_story_images(&scenes, STYLE, 3).await;

    assert_eq!(images.len(), 2);
    assert!(images.iter().all(|img| img.chapter == 3));
    assert_eq!(images[1].scene, 2);
    assert_eq!(images[1].description, scenes[1]);
    assert_eq!(images[1].file_name(), "chapter_3_scene_2.png");
}

#[tokio::test]
async fn test_config_drives_candidates_and_size() {
    let mut config = FabulistConfig::defaults().unwrap();
    config.image.candidates = vec!["custom/model".to_string()];
    config.image.width = 64;
    config.image.height = 32;

    let driver = MockImageDriver::new(&["custom/model"], ImageBehavior::Error);
    let mut illustrator = Illustrator::from_config(driver.clone(), &config.image);

    assert_eq!(illustrator.load_model().await, Some("custom/model"));
    let image = illustrator
        .generate_image(1, 1, "A bright sky", STYLE)
        .await
        .unwrap();

    assert_eq!(image.image.dimensions(), (64, 32));
    let calls = driver.generate_calls();
    assert_eq!(*calls[0].1.width(), 64);
    assert_eq!(calls[0].1.negative_prompt(), &config.image.negative_prompt);
}
