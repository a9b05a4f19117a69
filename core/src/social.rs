// Sosial-feeden: "likes" og venne-meldinger mottatt underveis i økten.
// Kapasitetene er kontrakter mot transport-laget og må ikke utvides.

/// Maks bytes i den samlede meldingsfeeden.
pub const SOCIAL_CAPACITY: usize = 2000;
/// Maks bytes i et vennenavn.
pub const FRIEND_NAME_CAPACITY: usize = 10;
/// Maks bytes i en enkeltmelding.
pub const FRIEND_MESSAGE_CAPACITY: usize = 20;

/// Starttekst før noen meldinger er mottatt.
pub const SOCIAL_INIT: &str = "Well, there are no messages received yet. \
Keep going and I'll vibe you when something comes up even while you swim!";

/// Eid streng med fast bytekapasitet. Alt som ikke får plass kuttes på
/// nærmeste char-grense; nedstrøms transport antar denne grensen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedString {
    buf: String,
    capacity: usize,
}

impl BoundedString {
    pub fn new(capacity: usize) -> Self {
        Self { buf: String::new(), capacity }
    }

    pub fn with_content(content: &str, capacity: usize) -> Self {
        let mut s = Self::new(capacity);
        s.replace(content);
        s
    }

    /// Bytt ut hele innholdet (avkortes ved behov).
    pub fn replace(&mut self, content: &str) {
        self.buf.clear();
        self.buf.push_str(truncated(content, self.capacity));
    }

    /// Legg til på slutten; det som går over kapasiteten kuttes.
    pub fn append(&mut self, content: &str) {
        let room = self.capacity - self.buf.len();
        self.buf.push_str(truncated(content, room));
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Lengste prefiks av `s` på maks `max` bytes, kuttet på char-grense.
fn truncated(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Likes-teller pluss meldingsfeed med fast kapasitet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialFeed {
    likes: i32,
    feed: BoundedString,
}

impl Default for SocialFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialFeed {
    pub fn new() -> Self {
        Self {
            likes: 0,
            feed: BoundedString::with_content(SOCIAL_INIT, SOCIAL_CAPACITY),
        }
    }

    /// Ta imot en melding fra en venn. Første melding erstatter
    /// startteksten, resten legges bakpå.
    pub fn receive(&mut self, friend_name: &str, message: &str) {
        let name = truncated(friend_name, FRIEND_NAME_CAPACITY);
        let msg = truncated(message, FRIEND_MESSAGE_CAPACITY);
        let entry = format!("[{name}]: {msg}  ");

        if self.likes == 0 {
            self.feed.replace(&entry);
        } else {
            self.feed.append(&entry);
        }
        self.likes += 1;
    }

    pub fn likes(&self) -> i32 {
        self.likes
    }

    pub fn text(&self) -> &str {
        self.feed.as_str()
    }

    /// Teksten som sendes ut: tom inntil første like er mottatt.
    pub fn outbox_text(&self) -> &str {
        if self.likes > 0 {
            self.feed.as_str()
        } else {
            ""
        }
    }

    /// Gjenoppbygg fra lagret tilstand.
    pub fn restore(&mut self, likes: i32, text: &str) {
        self.likes = likes;
        self.feed.replace(text);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
