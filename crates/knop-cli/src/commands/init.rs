//! The `knop init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_starter(Path::new("knop.toml"), SAMPLE_CONFIG)?;
    write_starter(Path::new("deck.toml"), STARTER_DECK)?;

    println!("\nNext steps:");
    println!("  1. Add your own words and notes to deck.toml");
    println!("  2. Run: knop seed");
    println!("  3. Run: knop quiz --count 5");

    Ok(())
}

fn write_starter(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# knop configuration

database_path = "knop.db"
default_quiz_size = 5
auto_seed = true
deck_path = "deck.toml"
"#;

const STARTER_DECK: &str = r#"# knop deck
#
# Running `knop seed` replaces the whole library with this deck.

[[vocabulary]]
language = "en"
word = "apple"
phonetic = "/ˈæp.əl/"
meaning = "quả táo"
example = "I eat an apple every day"

[[vocabulary]]
language = "cn"
word = "谢谢"
phonetic = "xiè xie"
meaning = "cảm ơn"
example = "谢谢你的帮助"

[[notes]]
topic = "Rust ownership"
content = "Every value has a single owner. When the owner goes out of scope the value is dropped."

[[notes.questions]]
question = "What happens to a value when its owner goes out of scope?"
answer = "It is dropped"

[[notes.questions]]
question = "Can a value have two owners at the same time?"
answer = "No"
question_type = "yes_no"
"#;
