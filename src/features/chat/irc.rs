//! Twitch IRC line handling.
//!
//! Only the handful of shapes the overlay needs: the anonymous login
//! handshake, `PING` keep-alives and `PRIVMSG` chat lines.

use once_cell::sync::Lazy;
use regex::Regex;

/// Reply to a server `PING`.
pub const PONG: &str = "PONG :tmi.twitch.tv";

/// Credential line for anonymous read-only access; Twitch ignores the value.
const ANONYMOUS_PASS: &str = "PASS SCHMOOPIIE";

// :<user>!<user>@<host> PRIVMSG #<channel> :<text>, optionally preceded by IRCv3 tags
static PRIVMSG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:@\S+\s+)?:(\w+)!\S*\s+PRIVMSG\s+#\w+\s+:(.*)$")
        .unwrap_or_else(|e| panic!("Invalid privmsg regex: {e}"))
});

/// Classification of an inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrcLine {
    /// Server keepalive check.
    Ping,
    /// Chat message.
    Privmsg {
        /// Sender login.
        username: String,
        /// Trimmed message text.
        text: String,
    },
    /// Anything else (numerics, JOIN echoes, notices).
    Other,
}

/// Classify one inbound line.
#[must_use]
pub fn parse_line(line: &str) -> IrcLine {
    let line = line.trim_end_matches(&['\r', '\n'][..]);

    if line.starts_with("PING") {
        return IrcLine::Ping;
    }

    let Some(caps) = PRIVMSG_PATTERN.captures(line) else {
        return IrcLine::Other;
    };

    let (Some(username), Some(text)) = (caps.get(1), caps.get(2)) else {
        return IrcLine::Other;
    };
    let text = text.as_str().trim();
    if text.is_empty() {
        return IrcLine::Other;
    }

    IrcLine::Privmsg {
        username: username.as_str().to_string(),
        text: text.to_string(),
    }
}

/// The three lines sent right after connecting.
#[must_use]
pub fn handshake(channel: &str, nick: &str) -> [String; 3] {
    [
        ANONYMOUS_PASS.to_string(),
        format!("NICK {nick}"),
        format!("JOIN #{channel}"),
    ]
}

/// Normalize a channel name: trimmed, no leading `#`, lowercase.
#[must_use]
pub fn normalize_channel(value: &str) -> String {
    value.trim().trim_start_matches('#').to_ascii_lowercase()
}
