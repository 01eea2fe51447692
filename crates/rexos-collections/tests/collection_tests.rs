//! Integration tests for collections over a scanned game library

use rexos_collections::{CollectionRegistry, FileChange, RecordedEvents};
use rexos_config::{CollectionSettings, RexOSConfig};
use rexos_library::{
    FilterType, GameRef, RomScanner, SystemList, apply_gamelist, keys, parse_gamelist_xml,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with ROMs, a collections folder and a theme set
struct CollectionTestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    roms_dir: PathBuf,
    collections_dir: PathBuf,
    themes_dir: PathBuf,
}

impl CollectionTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let roms_dir = temp_dir.path().join("roms");
        let collections_dir = temp_dir.path().join("config").join("collections");
        let themes_dir = temp_dir.path().join("themes");

        for (system, games) in [
            ("snes", &["zelda.sfc", "contra.sfc", "mario kart.sfc"][..]),
            ("gba", &["pokemon.gba", "metroid.gba"][..]),
        ] {
            fs::create_dir_all(roms_dir.join(system)).expect("Failed to create ROM directory");
            for game in games {
                fs::write(roms_dir.join(system).join(game), [0u8; 16])
                    .expect("Failed to create test ROM");
            }
        }
        fs::create_dir_all(themes_dir.join("default")).expect("Failed to create theme set");

        Self {
            temp_dir,
            roms_dir,
            collections_dir,
            themes_dir,
        }
    }

    fn library(&self) -> SystemList {
        RomScanner::new()
            .scan_all(&self.roms_dir)
            .expect("Failed to scan ROMs")
    }

    fn game(&self, system: &str, file: &str) -> GameRef {
        let path = self.roms_dir.join(system).join(file);
        GameRef::new(system, path.to_string_lossy().to_string())
    }

    fn config(&self, enabled: &str) -> RexOSConfig {
        let mut config = RexOSConfig::default();
        config.collections.enabled = enabled.to_string();
        config.themes.search_paths = vec![self.themes_dir.clone()];
        config
    }

    fn registry(&self, enabled: &str) -> CollectionRegistry<RecordedEvents> {
        CollectionRegistry::new(
            &self.config(enabled),
            self.collections_dir.clone(),
            RecordedEvents::new(),
        )
    }

    fn add_theme_folder(&self, folder: &str) {
        let path = self.themes_dir.join("default").join(folder);
        fs::create_dir_all(&path).expect("Failed to create theme folder");
        fs::write(path.join("theme.xml"), "<theme/>").expect("Failed to write theme");
    }

    fn collection_file(&self, name: &str) -> PathBuf {
        self.collections_dir.join(format!("custom-{}.cfg", name))
    }
}

fn settings(enabled: &[&str]) -> CollectionSettings {
    let mut settings = CollectionSettings::default();
    let names: Vec<String> = enabled.iter().map(|name| name.to_string()).collect();
    settings.set_enabled_list(&names);
    settings
}

fn displayed(registry: &CollectionRegistry<RecordedEvents>) -> Vec<String> {
    registry
        .displayed_systems()
        .iter()
        .map(|entry| entry.name.clone())
        .collect()
}

#[test]
fn test_favorites_follow_metadata() {
    let env = CollectionTestEnv::new();
    let mut libs = env.library();
    let mut registry = env.registry("favorite");
    registry.load_collection_systems(&libs).unwrap();

    let zelda = env.game("snes", "zelda.sfc");
    assert!(registry.get("favorite").unwrap().system().is_empty());

    libs.game_mut(&zelda)
        .unwrap()
        .metadata
        .set_bool(keys::FAVORITE, true);
    registry.sync_all_on_change(&libs, &zelda);
    assert!(registry.get("favorite").unwrap().system().contains(&zelda.path));

    libs.game_mut(&zelda)
        .unwrap()
        .metadata
        .set_bool(keys::FAVORITE, false);
    registry.sync_all_on_change(&libs, &zelda);
    assert!(!registry.get("favorite").unwrap().system().contains(&zelda.path));
    assert_eq!(
        registry.events().changes_for("favorite", FileChange::Removed),
        vec![zelda.path.as_str()]
    );

    // Nothing changed since the last sync
    let recorded = registry.events().changes.len();
    registry.sync_all_on_change(&libs, &zelda);
    assert!(registry.get("favorite").unwrap().system().is_empty());
    assert_eq!(registry.events().changes.len(), recorded);
}

#[test]
fn test_auto_toggle_twice_restores_state() {
    let env = CollectionTestEnv::new();
    let mut libs = env.library();
    let mut registry = env.registry("favorite,all");
    registry.load_collection_systems(&libs).unwrap();
    assert_eq!(registry.editing_collection(), Some("favorite"));

    let contra = env.game("snes", "contra.sfc");
    assert!(registry.toggle_game_in_collection(&mut libs, &contra));
    assert!(registry.get("favorite").unwrap().system().contains(&contra.path));
    assert!(libs.game(&contra).unwrap().metadata.get_bool(keys::FAVORITE));
    assert!(
        registry
            .get("all")
            .unwrap()
            .system()
            .get(&contra.path)
            .unwrap()
            .metadata
            .get_bool(keys::FAVORITE)
    );

    assert!(registry.toggle_game_in_collection(&mut libs, &contra));
    assert!(!registry.get("favorite").unwrap().system().contains(&contra.path));
    assert!(!libs.game(&contra).unwrap().metadata.get_bool(keys::FAVORITE));
    assert_eq!(
        registry.events().last_popup(),
        Some("Removed 'contra' from 'FAVORITE'")
    );
}

#[test]
fn test_toggle_without_edit_session() {
    let env = CollectionTestEnv::new();
    let mut libs = env.library();
    let mut registry = env.registry("");
    registry.load_collection_systems(&libs).unwrap();

    assert!(!registry.is_editing());
    let zelda = env.game("snes", "zelda.sfc");
    assert!(!registry.toggle_game_in_collection(&mut libs, &zelda));
}

#[test]
fn test_custom_collection_persists() {
    let env = CollectionTestEnv::new();
    let zelda = env.game("snes", "zelda.sfc");
    let pokemon = env.game("gba", "pokemon.gba");

    {
        let mut libs = env.library();
        let mut registry = env.registry("favorite");
        registry.load_collection_systems(&libs).unwrap();

        let name = registry.create_custom_collection("My Favs!!", &libs);
        assert_eq!(name, "My Favs");

        registry.apply_settings(settings(&["favorite", "My Favs"]), &libs);
        registry.set_edit_mode("My Favs", &libs).unwrap();
        assert!(registry.toggle_game_in_collection(&mut libs, &zelda));
        assert!(registry.toggle_game_in_collection(&mut libs, &pokemon));
        assert_eq!(
            registry.events().last_popup(),
            Some("Added 'pokemon' to 'MY FAVS'")
        );
        // Dropping the registry flushes unsaved collections
    }

    let content = fs::read_to_string(env.collection_file("My Favs")).unwrap();
    let mut expected = vec![pokemon.path.clone(), zelda.path.clone()];
    expected.sort();
    assert_eq!(content.lines().collect::<Vec<_>>(), expected);

    let libs = env.library();
    let mut registry = env.registry("My Favs");
    registry.load_collection_systems(&libs).unwrap();
    let collection = registry.get("My Favs").unwrap();
    assert!(collection.is_custom());
    assert!(collection.is_populated());
    assert_eq!(collection.system().len(), 2);
    assert!(collection.system().contains(&zelda.path));
}

#[test]
fn test_custom_toggle_twice_restores_state() {
    let env = CollectionTestEnv::new();
    let mut libs = env.library();
    let mut registry = env.registry("");
    registry.load_collection_systems(&libs).unwrap();

    registry.create_custom_collection("Arcade", &libs);
    registry.apply_settings(settings(&["Arcade"]), &libs);
    registry.set_edit_mode("Arcade", &libs).unwrap();

    let metroid = env.game("gba", "metroid.gba");
    assert!(registry.toggle_game_in_collection(&mut libs, &metroid));
    assert!(registry.toggle_game_in_collection(&mut libs, &metroid));
    assert!(registry.get("Arcade").unwrap().system().is_empty());
    assert!(registry.get("Arcade").unwrap().needs_save());

    registry.save_all().unwrap();
    assert!(!registry.get("Arcade").unwrap().needs_save());
    assert_eq!(fs::read_to_string(env.collection_file("Arcade")).unwrap(), "");
}

#[test]
fn test_unique_collection_names() {
    let env = CollectionTestEnv::new();
    let libs = env.library();
    let mut registry = env.registry("");
    registry.load_collection_systems(&libs).unwrap();

    assert_eq!(registry.create_custom_collection("My Favs", &libs), "My Favs");
    assert_eq!(registry.create_custom_collection("My Favs", &libs), "My Favs (1)");
    assert_eq!(registry.create_custom_collection("My Favs!!", &libs), "My Favs (2)");
    assert_eq!(registry.create_custom_collection("???", &libs), "New Collection");
    assert_eq!(registry.create_custom_collection("Retro !", &libs), "Retro");

    // System and declaration names are taken too
    assert_eq!(registry.valid_new_collection_name("snes", &libs), "snes (1)");
    assert_eq!(registry.valid_new_collection_name("recent", &libs), "recent (1)");
}

#[test]
fn test_sanitized_name_can_be_enabled() {
    let env = CollectionTestEnv::new();
    let libs = env.library();
    let mut registry = env.registry("");
    registry.load_collection_systems(&libs).unwrap();

    let name = registry.create_custom_collection("Retro !", &libs);
    registry.apply_settings(settings(&[name.as_str()]), &libs);

    assert_eq!(registry.enabled_collections(), vec!["Retro"]);
    registry.set_edit_mode(&name, &libs).unwrap();
    assert_eq!(registry.editing_collection(), Some("Retro"));
}

#[test]
fn test_custom_collection_without_file_populates_once() {
    let env = CollectionTestEnv::new();
    fs::create_dir_all(&env.collections_dir).unwrap();
    fs::write(env.collection_file("Arcade"), "").unwrap();

    let mut libs = env.library();
    let mut registry = env.registry("");
    registry.load_collection_systems(&libs).unwrap();
    assert!(!registry.get("Arcade").unwrap().is_populated());

    fs::remove_file(env.collection_file("Arcade")).unwrap();
    registry.apply_settings(settings(&["Arcade"]), &libs);
    registry.set_edit_mode("Arcade", &libs).unwrap();

    let zelda = env.game("snes", "zelda.sfc");
    let contra = env.game("snes", "contra.sfc");
    assert!(registry.toggle_game_in_collection(&mut libs, &zelda));
    assert!(registry.get("Arcade").unwrap().is_populated());

    registry.save_all().unwrap();
    assert!(registry.toggle_game_in_collection(&mut libs, &contra));

    let arcade = registry.get("Arcade").unwrap().system();
    assert_eq!(arcade.len(), 2);
    assert_eq!(arcade.index().count(FilterType::Favorites, "FALSE"), 2);

    // Members are visible to deletion once populated
    registry.delete_entries_for(&zelda);
    let arcade = registry.get("Arcade").unwrap().system();
    assert_eq!(arcade.paths().collect::<Vec<_>>(), vec![contra.path.as_str()]);
    assert_eq!(arcade.index().count(FilterType::Favorites, "FALSE"), 1);
}

#[test]
fn test_bundle_holds_unthemed_custom_collections() {
    let env = CollectionTestEnv::new();
    let mut libs = env.library();
    let mut registry = env.registry("");
    registry.load_collection_systems(&libs).unwrap();

    registry.create_custom_collection("Shooters", &libs);
    registry.create_custom_collection("Puzzle", &libs);
    registry.apply_settings(settings(&["Shooters", "Puzzle"]), &libs);

    // Both collections are empty: no bundle slot
    assert_eq!(displayed(&registry), vec!["gba", "snes"]);
    assert_eq!(registry.bundle().members(), ["Puzzle", "Shooters"]);

    registry.set_edit_mode("Shooters", &libs).unwrap();
    registry.toggle_game_in_collection(&mut libs, &env.game("snes", "contra.sfc"));
    registry.update_systems_list(&libs);

    assert_eq!(displayed(&registry), vec!["gba", "snes", "collections"]);
    assert_eq!(registry.bundle().index().count(FilterType::Favorites, "FALSE"), 1);
    assert_eq!(registry.resolve_display_target("Shooters"), "collections");
    assert_eq!(registry.resolve_display_target("Puzzle"), "collections");
}

#[test]
fn test_themed_custom_collection_gets_own_slot() {
    let env = CollectionTestEnv::new();
    env.add_theme_folder("Shooters");
    let libs = env.library();
    let mut registry = env.registry("");
    registry.load_collection_systems(&libs).unwrap();

    registry.create_custom_collection("Shooters", &libs);
    registry.create_custom_collection("Puzzle", &libs);
    registry.apply_settings(settings(&["Shooters", "Puzzle"]), &libs);

    assert_eq!(displayed(&registry), vec!["gba", "snes", "Shooters"]);
    assert_eq!(registry.resolve_display_target("Shooters"), "Shooters");
    assert_eq!(registry.bundle().members(), ["Puzzle"]);
}

#[test]
fn test_bundling_disabled() {
    let env = CollectionTestEnv::new();
    let libs = env.library();
    let mut registry = env.registry("");
    registry.load_collection_systems(&libs).unwrap();

    registry.create_custom_collection("Shooters", &libs);
    let mut settings = settings(&["Shooters", "recent"]);
    settings.bundle_custom = false;
    registry.apply_settings(settings, &libs);

    assert_eq!(displayed(&registry), vec!["gba", "snes", "recent", "Shooters"]);
    assert!(registry.bundle().is_empty());
}

#[test]
fn test_mixed_ordering() {
    let env = CollectionTestEnv::new();
    let libs = env.library();
    let mut registry = env.registry("");
    registry.load_collection_systems(&libs).unwrap();

    registry.create_custom_collection("Arcade", &libs);
    let mut settings = settings(&["favorite", "all", "Arcade", "recent"]);
    settings.sort_with_systems = true;
    settings.bundle_custom = false;
    registry.apply_settings(settings, &libs);

    assert_eq!(
        displayed(&registry),
        vec!["Arcade", "gba", "snes", "all", "favorite", "recent"]
    );
}

#[test]
fn test_split_ordering() {
    let env = CollectionTestEnv::new();
    let libs = env.library();
    let mut registry = env.registry("");
    registry.load_collection_systems(&libs).unwrap();

    registry.create_custom_collection("Arcade", &libs);
    let mut settings = settings(&["favorite", "all", "Arcade", "recent"]);
    settings.bundle_custom = false;
    registry.apply_settings(settings, &libs);

    assert_eq!(
        displayed(&registry),
        vec!["gba", "snes", "all", "Arcade", "favorite", "recent"]
    );
}

#[test]
fn test_edit_mode_exits_when_collection_disabled() {
    let env = CollectionTestEnv::new();
    let libs = env.library();
    let mut registry = env.registry("favorite");
    registry.load_collection_systems(&libs).unwrap();

    registry.create_custom_collection("Arcade", &libs);
    registry.apply_settings(settings(&["favorite", "Arcade"]), &libs);
    registry.set_edit_mode("Arcade", &libs).unwrap();
    assert_eq!(registry.editing_collection(), Some("Arcade"));
    assert_eq!(registry.editing_label(), "Arcade");

    registry.events_mut().clear();
    registry.apply_settings(settings(&["favorite"]), &libs);

    assert_eq!(
        registry.events().popups,
        vec![
            "Finished editing the 'Arcade' Collection.".to_string(),
            "Editing the 'FAVORITE' Collection. Add/remove games with Y.".to_string(),
        ]
    );
    assert_eq!(registry.editing_collection(), Some("favorite"));
    assert_eq!(registry.editing_label(), "Favorites");
    assert!(registry.is_editing());
}

#[test]
fn test_exit_edit_mode_without_favorites() {
    let env = CollectionTestEnv::new();
    let libs = env.library();
    let mut registry = env.registry("kidgame");
    registry.load_collection_systems(&libs).unwrap();

    registry.set_edit_mode("kidgame", &libs).unwrap();
    registry.exit_edit_mode(&libs);

    assert!(!registry.is_editing());
    assert!(registry.editing_collection().is_none());
    assert_eq!(registry.editing_label(), "Favorites");
}

#[test]
fn test_delete_entries_for() {
    let env = CollectionTestEnv::new();
    let mut libs = env.library();
    let zelda = env.game("snes", "zelda.sfc");
    let contra = env.game("snes", "contra.sfc");

    {
        let mut registry = env.registry("all");
        registry.load_collection_systems(&libs).unwrap();
        registry.create_custom_collection("Arcade", &libs);
        registry.apply_settings(settings(&["all", "Arcade"]), &libs);
        registry.set_edit_mode("Arcade", &libs).unwrap();
        registry.toggle_game_in_collection(&mut libs, &zelda);
        registry.toggle_game_in_collection(&mut libs, &contra);
        registry.save_all().unwrap();

        registry.delete_entries_for(&zelda);
        assert!(!registry.get("Arcade").unwrap().system().contains(&zelda.path));
        assert!(!registry.get("all").unwrap().system().contains(&zelda.path));
        assert!(registry.get("Arcade").unwrap().needs_save());
    }

    let content = fs::read_to_string(env.collection_file("Arcade")).unwrap();
    assert_eq!(content.lines().collect::<Vec<_>>(), vec![contra.path.as_str()]);
}

#[test]
fn test_custom_collection_skips_missing_games() {
    let env = CollectionTestEnv::new();
    let zelda = env.game("snes", "zelda.sfc");
    fs::create_dir_all(&env.collections_dir).unwrap();
    fs::write(
        env.collection_file("Old"),
        format!("{}\n/roms/snes/deleted.sfc\n", zelda.path),
    )
    .unwrap();
    fs::write(env.collections_dir.join("notes.txt"), "not a collection").unwrap();

    let libs = env.library();
    let mut registry = env.registry("Old");
    registry.load_collection_systems(&libs).unwrap();

    let old = registry.get("Old").unwrap();
    assert_eq!(old.system().paths().collect::<Vec<_>>(), vec![zelda.path.as_str()]);
    assert!(registry.get("notes").is_none());
}

#[test]
fn test_recent_collection_from_gamelist() {
    let env = CollectionTestEnv::new();
    let mut libs = env.library();
    let gamelist = r#"
<gameList>
    <game>
        <path>./zelda.sfc</path>
        <playcount>2</playcount>
        <lastplayed>20240101T120000</lastplayed>
    </game>
    <game>
        <path>./contra.sfc</path>
        <playcount>5</playcount>
        <lastplayed>20240301T120000</lastplayed>
    </game>
</gameList>
"#;
    let snes = libs.get_mut("snes").unwrap();
    assert_eq!(apply_gamelist(snes, parse_gamelist_xml(gamelist)), 2);

    let mut registry = env.registry("recent");
    registry.load_collection_systems(&libs).unwrap();

    let recent = registry.get("recent").unwrap();
    let zelda = env.game("snes", "zelda.sfc");
    let contra = env.game("snes", "contra.sfc");
    assert_eq!(
        recent.system().paths().collect::<Vec<_>>(),
        vec![contra.path.as_str(), zelda.path.as_str()]
    );
    assert!(
        recent
            .system()
            .metadata
            .get(keys::DESC)
            .starts_with("This collection contains 2 games")
    );
}

#[test]
fn test_unused_theme_folders() {
    let env = CollectionTestEnv::new();
    env.add_theme_folder("snes");
    env.add_theme_folder("Shooters");
    env.add_theme_folder("auto-favorites");

    let libs = env.library();
    let mut registry = env.registry("");
    registry.load_collection_systems(&libs).unwrap();

    assert_eq!(registry.unused_theme_folders(&libs), vec!["Shooters"]);
    assert!(registry.theme_folder_exists("snes"));
    assert!(!registry.theme_folder_exists("gba"));
}
