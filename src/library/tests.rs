use super::title::display_title;

fn exts() -> Vec<String> {
    vec!["mp4".into(), "webm".into()]
}

#[test]
fn display_title_strips_known_extensions() {
    assert_eq!(display_title("Song.mp4", &exts()), "Song");
    assert_eq!(display_title("Song.WEBM", &exts()), "Song");
    assert_eq!(display_title("  Artist - Song.webm ", &exts()), "Artist - Song");
}

#[test]
fn display_title_keeps_unknown_or_inner_extensions() {
    assert_eq!(display_title("Song.mp3", &exts()), "Song.mp3");
    assert_eq!(display_title("a.mp4 remix", &exts()), "a.mp4 remix");
    assert_eq!(display_title(".mp4", &exts()), ".mp4");
    assert_eq!(display_title("Tagged Title", &exts()), "Tagged Title");
}

#[test]
fn display_title_handles_multibyte_names() {
    assert_eq!(display_title("Café del Mar.mp4", &exts()), "Café del Mar");
    assert_eq!(display_title("ü", &exts()), "ü");
}
