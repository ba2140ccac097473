//! 章节分割器
//!
//! 按优先级依次尝试各类章节标题格式，使用第一个在全文中有匹配的格式切分章节。
//! 不同格式不会混用：一份文稿内部的标题风格应当一致。

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::manuscript::{title_from_filename, Chapter, ChapterId};

/// 没有文件名时单章节的标题
const FALLBACK_TITLE: &str = "Chapter 1";

// 所有模式: 忽略大小写、按行锚定、兼容 CRLF。
// 标题行之后可选的分隔符 + 标题只占本行，不跨行。

/// `Chapter 12`、`Chapter 12 - 标题`、`Chapter 12: 标题`
static CHAPTER_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?imR)^chapter[ \t]+(\d+)(?:[ \t]*[-:][ \t]*(.+))?[ \t]*$")
        .expect("chapter number pattern")
});

/// `Chapter One` ~ `Chapter Twelve`
static CHAPTER_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?imR)^chapter[ \t]+(one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve)(?:[ \t]*[-:][ \t]*(.+))?[ \t]*$",
    )
    .expect("chapter word pattern")
});

/// `Chapter IV`
static CHAPTER_ROMAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?imR)^chapter[ \t]+([ivx]+)(?:[ \t]*[-:][ \t]*(.+))?[ \t]*$")
        .expect("chapter roman pattern")
});

/// `3.`、`3. 标题`
static NUMBERED_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?imR)^(\d+)\.(?:[ \t]*(.+))?[ \t]*$").expect("numbered list pattern")
});

/// `第十二章`、`第十二章 标题`、`第十二章：标题`
static CHINESE_NUMERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?imR)^第[一二三四五六七八九十百千万零〇两]+章(?:[ \t]*[-:：]?[ \t]*(.+))?[ \t]*$")
        .expect("chinese numeral pattern")
});

/// 章节标题格式（按优先级排列）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingStyle {
    /// `Chapter 1`
    ChapterNumber,
    /// `Chapter One`
    ChapterWord,
    /// `Chapter I`
    ChapterRoman,
    /// `1.`
    NumberedList,
    /// `第一章`
    ChineseNumeral,
}

impl HeadingStyle {
    /// 全部格式，按匹配优先级排列
    pub const ALL: [HeadingStyle; 5] = [
        HeadingStyle::ChapterNumber,
        HeadingStyle::ChapterWord,
        HeadingStyle::ChapterRoman,
        HeadingStyle::NumberedList,
        HeadingStyle::ChineseNumeral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChapterNumber => "chapter_number",
            Self::ChapterWord => "chapter_word",
            Self::ChapterRoman => "chapter_roman",
            Self::NumberedList => "numbered_list",
            Self::ChineseNumeral => "chinese_numeral",
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            Self::ChapterNumber => &*CHAPTER_NUMBER_RE,
            Self::ChapterWord => &*CHAPTER_WORD_RE,
            Self::ChapterRoman => &*CHAPTER_ROMAN_RE,
            Self::NumberedList => &*NUMBERED_LIST_RE,
            Self::ChineseNumeral => &*CHINESE_NUMERAL_RE,
        }
    }

    /// 该格式在文本中所有标题的 (起始偏移, 标题文本)
    fn headings<'t>(&self, text: &'t str) -> Vec<(usize, &'t str)> {
        self.regex()
            .find_iter(text)
            .map(|m| (m.start(), m.as_str().trim()))
            .collect()
    }
}

impl std::fmt::Display for HeadingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 检测文本使用的标题格式
///
/// 返回第一个在全文中至少匹配一次的格式；都不匹配时返回 `None`
pub fn detect_heading_style(text: &str) -> Option<HeadingStyle> {
    HeadingStyle::ALL
        .into_iter()
        .find(|style| style.regex().is_match(text))
}

/// 将原始文本切分为章节
///
/// 分割策略：
/// 1. 按优先级找到第一个有匹配的标题格式
/// 2. 每个标题从其起始位置开始一章，到下一个标题之前结束
/// 3. 标题行保留在章节内容中，同时作为章节标题
/// 4. 没有任何标题时整篇作为一章，标题取自文件名
pub fn segment(text: &str, source_name: &str) -> Vec<Chapter> {
    let Some(style) = detect_heading_style(text) else {
        tracing::debug!(source = %source_name, "No chapter headings found, using single chapter");
        return vec![single_chapter(text, source_name)];
    };

    let headings = style.headings(text);
    let preamble = text[..headings[0].0].trim();
    if !preamble.is_empty() {
        tracing::warn!(
            source = %source_name,
            chars = preamble.chars().count(),
            "Text before the first chapter heading is dropped"
        );
    }

    let chapters: Vec<Chapter> = headings
        .iter()
        .enumerate()
        .map(|(index, &(start, title))| {
            let end = headings
                .get(index + 1)
                .map(|&(next, _)| next)
                .unwrap_or(text.len());
            let position = index + 1;
            Chapter::new(
                ChapterId::numbered(position),
                title,
                text[start..end].trim(),
                position as f64,
            )
        })
        .collect();

    tracing::debug!(
        source = %source_name,
        style = %style,
        chapters = chapters.len(),
        "Chapters segmented"
    );

    chapters
}

/// 整篇作为单个章节
fn single_chapter(text: &str, source_name: &str) -> Chapter {
    let title = title_from_filename(source_name);
    let title = if title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        title
    };
    Chapter::new(ChapterId::numbered(1), title, text.trim(), 1.0)
}
