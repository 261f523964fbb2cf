use fabulist_core::{ArtStyle, DEFAULT_CHAPTER_LENGTH, DEFAULT_CREATIVITY, GenerationSettings};

#[test]
fn default_settings_are_valid() {
    let settings = GenerationSettings::default();
    assert_eq!(*settings.chapter_length(), DEFAULT_CHAPTER_LENGTH);
    assert_eq!(*settings.creativity(), DEFAULT_CREATIVITY);
    assert_eq!(*settings.art_style(), ArtStyle::Fantasy);
    assert!(settings.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_length() {
    assert!(GenerationSettings::default().with_chapter_length(49).validate().is_err());
    assert!(GenerationSettings::default().with_chapter_length(301).validate().is_err());
    assert!(GenerationSettings::default().with_chapter_length(50).validate().is_ok());
    assert!(GenerationSettings::default().with_chapter_length(300).validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_creativity() {
    assert!(GenerationSettings::default().with_creativity(0.0).validate().is_err());
    assert!(GenerationSettings::default().with_creativity(1.6).validate().is_err());
    assert!(GenerationSettings::default().with_creativity(1.5).validate().is_ok());
}

#[test]
fn validate_rejects_blank_custom_style() {
    let settings = GenerationSettings::default().with_art_style(ArtStyle::Custom("  ".into()));
    assert!(settings.validate().is_err());
}

#[test]
fn presets_exclude_custom() {
    let presets = ArtStyle::presets();
    assert_eq!(presets.len(), 6);
    assert!(!presets.iter().any(|s| matches!(s, ArtStyle::Custom(_))));
    assert_eq!(presets[0], ArtStyle::Fantasy);
}

#[test]
fn style_parses_names_and_prompts() {
    assert_eq!("oil_painting".parse::<ArtStyle>().unwrap(), ArtStyle::OilPainting);
    assert_eq!("Oil Painting".parse::<ArtStyle>().unwrap(), ArtStyle::OilPainting);
    assert_eq!(
        "realistic, photographic, detailed".parse::<ArtStyle>().unwrap(),
        ArtStyle::Realistic
    );
    assert_eq!(
        "cyberpunk, noir".parse::<ArtStyle>().unwrap(),
        ArtStyle::Custom("cyberpunk, noir".to_string())
    );
}
