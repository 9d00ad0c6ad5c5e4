//! The `lexdrill init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("lexdrill.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("json")?;
    std::fs::create_dir_all("progress")?;
    write_if_missing(Path::new("json/hsk1.json"), SAMPLE_VOCABULARY)?;

    println!("\nNext steps:");
    println!("  1. Add your word lists to json/ as hsk1.json, hsk2.json, ...");
    println!("  2. Run: lexdrill validate --level 1");
    println!("  3. Run: lexdrill quiz --level 1");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lexdrill configuration

vocab_dir = "json"
progress_dir = "progress"
file_prefix = "hsk"
default_level = 1
max_level = 4

[session]
# recognize: answer with the written form; produce: answer with the translation
direction = "recognize"
# weighted or sequential
selection = "weighted"
show_romanization = true
show_written_form = true
show_metadata = true
"#;

const SAMPLE_VOCABULARY: &str = r#"[
  {
    "simplified": "你好",
    "pinyin": ["nǐ hǎo", "ni3 hao3"],
    "english_concise": "hello",
    "english_descriptive": "hello; hi",
    "example_cn": "你好，我是学生。",
    "example_pinyin": "Nǐ hǎo, wǒ shì xuésheng.",
    "example_en": "Hello, I am a student.",
    "categories": ["greeting"]
  },
  {
    "simplified": "书",
    "pinyin": ["shū", "shu1"],
    "english_concise": "book",
    "english_descriptive": "book; letter; document",
    "example_cn": "这是我的书。",
    "example_pinyin": "Zhè shì wǒ de shū.",
    "example_en": "This is my book.",
    "categories": ["noun"],
    "measure_word": {"character": "本", "pinyin": "běn"}
  },
  {
    "simplified": "喝",
    "pinyin": ["hē", "he1"],
    "english_concise": "drink",
    "english_descriptive": "to drink",
    "example_cn": "我想喝茶。",
    "example_pinyin": "Wǒ xiǎng hē chá.",
    "example_en": "I want to drink tea.",
    "categories": ["verb"]
  }
]
"#;
