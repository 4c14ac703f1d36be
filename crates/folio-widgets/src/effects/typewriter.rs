#![forbid(unsafe_code)]

//! Typewriter that spells out a rotating list of phrases.
//!
//! Each word is typed as a highlighted initial followed by the rest of its
//! letters and a trailing space, one glyph per step. After the last word the
//! text holds, is erased one visible glyph at a time, and after a short pause
//! the next phrase (wrapping) starts.
//!
//! ```text
//! Typing ──all words typed──► Holding ──hold elapsed──► Erasing ──empty──► Pausing ──► Typing
//! ```

use std::time::Duration;

use folio_runtime::EffectsMotion;

/// Guards against a zero-length step spinning forever.
const MIN_STEP: Duration = Duration::from_millis(1);

/// Class of the span wrapped around each word's initial.
pub const HIGHLIGHT_CLASS: &str = "highlight";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterPhase {
    /// `word` is the index of the word being typed; `letter` counts its
    /// glyphs already typed.
    Typing { word: usize, letter: usize },
    Holding,
    Erasing,
    Pausing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Initial(char),
    Plain(char),
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<Vec<char>>>,
    index: usize,
    glyphs: Vec<Glyph>,
    phase: TypewriterPhase,
    wait: Duration,
    elapsed: Duration,
    typing_step: Duration,
    erasing_step: Duration,
    hold: Duration,
    restart: Duration,
}

impl Typewriter {
    pub fn new<I, P>(phrases: I, motion: &EffectsMotion) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().split_whitespace().map(|w| w.chars().collect()).collect())
            .collect();
        Self {
            phrases,
            index: 0,
            glyphs: Vec::new(),
            phase: TypewriterPhase::Typing { word: 0, letter: 0 },
            wait: Duration::ZERO,
            elapsed: Duration::ZERO,
            typing_step: motion.typing_step(),
            erasing_step: motion.erase_step(),
            hold: motion.hold(),
            restart: motion.restart(),
        }
    }

    #[inline]
    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    /// Index of the phrase being shown.
    #[inline]
    pub fn phrase_index(&self) -> usize {
        self.index
    }

    /// Number of visible glyphs.
    pub fn visible_len(&self) -> usize {
        self.glyphs.len()
    }

    /// Plain text without markup.
    pub fn text(&self) -> String {
        self.glyphs
            .iter()
            .map(|g| match *g {
                Glyph::Initial(c) | Glyph::Plain(c) => c,
            })
            .collect()
    }

    /// Current content as markup, initials wrapped in highlight spans.
    pub fn markup(&self) -> String {
        let mut out = String::new();
        for glyph in &self.glyphs {
            match *glyph {
                Glyph::Initial(c) => {
                    out.push_str("<span class=\"");
                    out.push_str(HIGHLIGHT_CLASS);
                    out.push_str("\">");
                    out.push(c);
                    out.push_str("</span>");
                }
                Glyph::Plain(c) => out.push(c),
            }
        }
        out
    }

    /// Advance by `dt`. Returns the new markup if the content changed.
    pub fn tick(&mut self, dt: Duration) -> Option<String> {
        if self.phrases.is_empty() {
            return None;
        }
        self.elapsed += dt;
        let mut changed = false;
        while self.elapsed >= self.wait {
            self.elapsed -= self.wait;
            changed |= self.step();
        }
        changed.then(|| self.markup())
    }

    /// Perform one scheduled step and set the wait until the next.
    fn step(&mut self) -> bool {
        let changed = match self.phase {
            TypewriterPhase::Typing { word, letter } => self.type_step(word, letter),
            TypewriterPhase::Holding | TypewriterPhase::Erasing => self.erase_step(),
            TypewriterPhase::Pausing => {
                self.phase = TypewriterPhase::Typing { word: 0, letter: 0 };
                return self.step();
            }
        };
        self.wait = self.wait.max(MIN_STEP);
        changed
    }

    fn type_step(&mut self, word: usize, letter: usize) -> bool {
        let words = &self.phrases[self.index];
        let Some(letters) = words.get(word) else {
            self.phase = TypewriterPhase::Holding;
            self.wait = self.hold;
            return false;
        };
        match letters.get(letter) {
            Some(&c) if letter == 0 => self.glyphs.push(Glyph::Initial(c)),
            Some(&c) => self.glyphs.push(Glyph::Plain(c)),
            None => {
                self.glyphs.push(Glyph::Plain(' '));
                self.phase = TypewriterPhase::Typing { word: word + 1, letter: 0 };
                self.wait = self.typing_step;
                return true;
            }
        }
        self.phase = TypewriterPhase::Typing { word, letter: letter + 1 };
        self.wait = self.typing_step;
        true
    }

    fn erase_step(&mut self) -> bool {
        if self.glyphs.pop().is_some() {
            self.phase = TypewriterPhase::Erasing;
            self.wait = self.erasing_step;
            true
        } else {
            self.index = (self.index + 1) % self.phrases.len();
            self.phase = TypewriterPhase::Pausing;
            self.wait = self.restart;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STEP: Duration = Duration::from_millis(50);

    fn writer(phrases: &[&str]) -> Typewriter {
        Typewriter::new(phrases.iter().copied(), &EffectsMotion::default())
    }

    #[test]
    fn first_step_is_immediate_and_highlighted() {
        let mut tw = writer(&["Let's Make Future"]);
        let markup = tw.tick(Duration::ZERO).unwrap();
        assert_eq!(markup, "<span class=\"highlight\">L</span>");
    }

    #[test]
    fn types_every_word_with_highlighted_initials() {
        let mut tw = writer(&["Learning Made Fun"]);
        tw.tick(Duration::ZERO);
        // 18 glyphs including the trailing space; the first is already out.
        for _ in 0..17 {
            tw.tick(STEP);
        }
        assert_eq!(tw.text(), "Learning Made Fun ");
        assert_eq!(
            tw.markup(),
            "<span class=\"highlight\">L</span>earning \
             <span class=\"highlight\">M</span>ade \
             <span class=\"highlight\">F</span>un "
        );
        assert!(matches!(tw.phase(), TypewriterPhase::Typing { word: 3, .. }));
        tw.tick(STEP);
        assert_eq!(tw.phase(), TypewriterPhase::Holding);
    }

    #[test]
    fn holds_erases_pauses_and_wraps() {
        let mut tw = writer(&["Ab", "Cd"]);
        tw.tick(Duration::ZERO);
        // "b", " ", then the hold decision.
        tw.tick(STEP * 3);
        assert_eq!(tw.phase(), TypewriterPhase::Holding);
        assert_eq!(tw.visible_len(), 3);

        assert_eq!(tw.tick(Duration::from_millis(1999)), None);
        assert_eq!(tw.tick(Duration::from_millis(1)).as_deref(), Some("<span class=\"highlight\">A</span>b"));
        assert_eq!(tw.phase(), TypewriterPhase::Erasing);

        tw.tick(Duration::from_millis(50));
        assert_eq!(tw.visible_len(), 0);
        tw.tick(Duration::from_millis(25));
        assert_eq!(tw.phase(), TypewriterPhase::Pausing);
        assert_eq!(tw.phrase_index(), 1);

        assert_eq!(tw.tick(Duration::from_millis(500)).as_deref(), Some("<span class=\"highlight\">C</span>"));

        tw.tick(STEP * 3 + Duration::from_millis(2000 + 25 * 4));
        assert_eq!(tw.phrase_index(), 0);
    }

    #[test]
    fn no_phrases_is_inert() {
        let mut tw = writer(&[]);
        assert_eq!(tw.tick(Duration::from_secs(10)), None);
    }
}
