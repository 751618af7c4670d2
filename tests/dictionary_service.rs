use dict_core::core::char_index::SingleCharIndex;
use dict_core::core::dictionary::OverlayDictionary;
use dict_core::persistence::{load_dictionary, save_dictionary};
use dict_core::{Config, DictError, DictionaryService, Word};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

const SINGLE_CHARS: &str = "你\tnihao\n好\thaoyun\n啊\taaaa\n呀\tyayu\n虚\txyqq\n字\tzabc\n戏\txyrr\n";

struct Fixture {
    _dir: TempDir,
    config: Config,
}

impl Fixture {
    fn new(base: &[Word], overlay: Option<&[Word]>) -> Self {
        let dir = TempDir::new().unwrap();
        let config = Config {
            single_char_path: dir.path().join("single.txt"),
            base_path: dir.path().join("base.txt"),
            overlay_path: dir.path().join("ime").join("new.txt"),
        };
        fs::write(&config.single_char_path, SINGLE_CHARS).unwrap();
        save_dictionary(&config.base_path, base).unwrap();
        if let Some(words) = overlay {
            save_dictionary(&config.overlay_path, words).unwrap();
        }
        Self { _dir: dir, config }
    }

    fn open(&self) -> DictionaryService {
        DictionaryService::open(&self.config).unwrap()
    }
}

#[test]
fn literal_encoding_scenarios() {
    let fixture = Fixture::new(&[], None);
    let svc = fixture.open();

    assert_eq!(svc.encode("你好"), "niha");
    assert_eq!(svc.encode("你好啊"), "nhaa");
    assert_eq!(svc.encode("你好啊呀"), "nhay");
    assert_eq!(svc.encode(""), "");
    assert!(svc.encode("龘").contains('龘'));
}

#[test]
fn single_characters_take_up_to_two_keys() {
    let fixture = Fixture::new(&[], None);
    let svc = fixture.open();
    let chars = SingleCharIndex::load(&fixture.config.single_char_path).unwrap();

    for word in chars.words() {
        let expected: String = word.code().chars().take(2).collect();
        assert_eq!(svc.encode(word.name()), expected);
    }
}

#[test]
fn multi_character_codes_have_four_keys() {
    let fixture = Fixture::new(&[], None);
    let svc = fixture.open();

    for word in ["你好", "虚字", "你好啊", "戏字呀", "你好啊呀", "虚字戏你好啊呀"] {
        assert_eq!(svc.encode(word).chars().count(), 4, "{}", word);
    }
}

#[test]
fn adding_a_base_word_conflicts_and_leaves_overlay_untouched() {
    let fixture = Fixture::new(&[Word::ranked("你好", "niha", 1)], Some(&[Word::ranked("虚字", "xyza", 1)]));
    let before = fs::read(&fixture.config.overlay_path).unwrap();
    let mut svc = fixture.open();

    match svc.add_word("你好") {
        Err(DictError::Conflict(existing)) => assert_eq!(existing, Word::ranked("你好", "niha", 1)),
        other => panic!("expected a conflict, got {:?}", other),
    }
    assert!(matches!(svc.add_word("虚字"), Err(DictError::Conflict(_))));
    assert_eq!(fs::read(&fixture.config.overlay_path).unwrap(), before);
}

#[test]
fn first_allocated_index_follows_base_ranks() {
    let fixture = Fixture::new(&[Word::ranked("须知", "xyza", 3)], None);
    let mut svc = fixture.open();

    assert_eq!(svc.encode("虚字"), "xyza");
    assert_eq!(svc.add_word("虚字").unwrap(), Word::ranked("虚字", "xyza", 4));
}

#[test]
fn indices_increase_per_code_in_call_order() {
    let fixture = Fixture::new(&[], None);
    let mut svc = fixture.open();

    let added: Vec<_> = ["虚字", "戏字", "虚字戏你好啊字"]
        .iter()
        .map(|name| svc.add_word(name).unwrap())
        .collect();
    assert_eq!(added[0].code(), "xyza");
    assert_eq!(added[1].code(), "xyza");
    assert_eq!(added[2].code(), "xzxz");
    assert_eq!(added[0].index(), Some(1));
    assert_eq!(added[1].index(), Some(2));
    assert_eq!(added[2].index(), Some(1));

    // Indices are not renumbered after a delete.
    svc.delete_word(&added[0]).unwrap();
    let next = svc.add_word("虚字").unwrap();
    assert_eq!(next.index(), Some(3));
}

#[test]
fn mutations_are_persisted_and_reloaded() {
    let fixture = Fixture::new(&[], None);
    assert!(!fixture.config.overlay_path.exists());

    let mut svc = fixture.open();
    let word = svc.add_word("你好").unwrap();
    assert_eq!(load_dictionary(&fixture.config.overlay_path).unwrap(), vec![word.clone()]);
    assert_eq!(fixture.open().find_existing("你好"), Some(&word));

    svc.delete_word(&word).unwrap();
    assert!(load_dictionary(&fixture.config.overlay_path).unwrap().is_empty());
    assert!(svc.find_existing("你好").is_none());
}

#[test]
fn delete_removes_every_equal_entry() {
    let dup = Word::ranked("你好", "niha", 1);
    let other = Word::ranked("虚字", "xyza", 1);
    let fixture = Fixture::new(&[], Some(&[dup.clone(), other.clone(), dup.clone()]));
    let mut svc = fixture.open();

    svc.delete_word(&dup).unwrap();
    assert_eq!(svc.overlay().words(), &[other]);
}

#[test]
fn deleting_an_absent_word_is_not_found_and_leaves_overlay_untouched() {
    let base_word = Word::ranked("你好", "niha", 1);
    let custom = Word::ranked("虚字", "xyza", 2);
    let fixture = Fixture::new(&[base_word.clone()], Some(&[custom.clone()]));
    let before = fs::read(&fixture.config.overlay_path).unwrap();
    let mut svc = fixture.open();

    // Base entries cannot be deleted.
    assert!(matches!(svc.delete_word(&base_word), Err(DictError::NotFound(_))));
    // A stale index does not match.
    let stale = Word::ranked("虚字", "xyza", 1);
    assert!(matches!(svc.delete_word(&stale), Err(DictError::NotFound(w)) if w == stale));

    assert_eq!(fs::read(&fixture.config.overlay_path).unwrap(), before);
    assert_eq!(svc.overlay().words(), &[custom]);
}

#[test]
fn save_then_load_preserves_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dict.txt");
    let words = vec![
        Word::ranked("你好", "niha", 1),
        Word::ranked("虚字", "xyza", 12),
        Word::ranked("𠀀字", "qqza", 0),
    ];

    save_dictionary(&path, &words).unwrap();
    let loaded: HashSet<Word> = load_dictionary(&path).unwrap().into_iter().collect();
    assert_eq!(loaded, words.into_iter().collect());
}

#[test]
fn malformed_overlay_fails_to_open() {
    let fixture = Fixture::new(&[], None);
    fs::create_dir_all(fixture.config.overlay_path.parent().unwrap()).unwrap();
    fs::write(&fixture.config.overlay_path, [0xFE, 0xFF, 0x00, 0x61]).unwrap();

    let err = OverlayDictionary::open(&fixture.config.overlay_path).unwrap_err();
    assert!(err.is_load_error());
    assert!(DictionaryService::open(&fixture.config).is_err());
}

#[test]
fn rejected_separator_name_keeps_overlay_readable() {
    let fixture = Fixture::new(&[], Some(&[Word::ranked("虚字", "xyza", 1)]));
    let before = fs::read(&fixture.config.overlay_path).unwrap();
    let mut svc = fixture.open();

    assert!(matches!(svc.add_word("你\t好"), Err(DictError::InvalidWord(_))));
    assert!(matches!(svc.add_word("龘\t好"), Err(DictError::InvalidWord(_))));

    assert_eq!(fs::read(&fixture.config.overlay_path).unwrap(), before);
    let reopened = fixture.open();
    assert_eq!(reopened.overlay().words(), &[Word::ranked("虚字", "xyza", 1)]);
}

#[test]
fn exhausted_index_leaves_overlay_untouched() {
    let fixture = Fixture::new(&[Word::ranked("须知", "xyza", u32::MAX)], Some(&[]));
    let before = fs::read(&fixture.config.overlay_path).unwrap();
    let mut svc = fixture.open();

    assert!(matches!(svc.add_word("虚字"), Err(DictError::IndexExhausted { .. })));
    assert_eq!(fs::read(&fixture.config.overlay_path).unwrap(), before);
}
