use serde::{Deserialize, Serialize};

/// Which enemy variant an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Walks back and forth on the platform it was placed on.
    Ground,
    /// Enters from a screen edge during play.
    Patrol,
}

/// Screen edge a patrol enemy entered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnSide {
    Left,
    Right,
}

/// Discrete things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    CoinCollected { score: u32 },
    PowerUpCollected { lives: u32 },
    EnemyStomped { kind: EnemyKind, points: u32 },
    PlayerHit { lives: u32, shrank: bool },
    EnemySpawned { side: SpawnSide },
    /// The last coin was collected.
    Victory { score: u32 },
    /// Lives reached zero. Emitted once per session; reset re-arms it.
    GameOverReached { score: u32 },
    Reset,
}

/// Sounds the audio collaborator knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    Coin,
    GameOver,
}

impl GameEvent {
    /// Sound to play for this event, if any.
    pub fn audio_cue(&self) -> Option<AudioCue> {
        match self {
            GameEvent::CoinCollected { .. } => Some(AudioCue::Coin),
            GameEvent::GameOverReached { .. } => Some(AudioCue::GameOver),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_coin_and_game_over_have_cues() {
        assert_eq!(
            GameEvent::CoinCollected { score: 10 }.audio_cue(),
            Some(AudioCue::Coin)
        );
        assert_eq!(
            GameEvent::GameOverReached { score: 0 }.audio_cue(),
            Some(AudioCue::GameOver)
        );
        assert_eq!(GameEvent::Victory { score: 100 }.audio_cue(), None);
        assert_eq!(GameEvent::Reset.audio_cue(), None);
        assert_eq!(
            GameEvent::PlayerHit {
                lives: 2,
                shrank: false
            }
            .audio_cue(),
            None
        );
    }

    #[test]
    fn event_json_is_tagged() {
        let json = serde_json::to_string(&GameEvent::EnemyStomped {
            kind: EnemyKind::Patrol,
            points: 200,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"enemy_stomped","kind":"patrol","points":200}"#
        );
    }

    #[test]
    fn event_json_roundtrip() {
        let events = [
            GameEvent::CoinCollected { score: 10 },
            GameEvent::PowerUpCollected { lives: 4 },
            GameEvent::EnemySpawned {
                side: SpawnSide::Right,
            },
            GameEvent::GameOverReached { score: 310 },
            GameEvent::Reset,
        ];
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let back: GameEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event, back);
        }
    }

    #[test]
    fn event_msgpack_roundtrip() {
        let event = GameEvent::PlayerHit {
            lives: 1,
            shrank: true,
        };
        let bytes = rmp_serde::to_vec_named(&event).unwrap();
        let back: GameEvent = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(event, back);
    }
}
