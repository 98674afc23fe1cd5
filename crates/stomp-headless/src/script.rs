use stomp_core::input::InputState;

/// Script played when none is given on the command line: walk right, hop
/// onto the first ledge, then wander back.
pub const DEMO_SCRIPT: &str = "right:40,right+jump:1,right:50,idle:20,left:60,jump:1,idle:60";

#[derive(Debug, PartialEq, Eq)]
pub enum ScriptError {
    /// A step is not of the form `keys:ticks`.
    BadStep(String),
    UnknownKey(String),
    BadTicks(String),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadStep(s) => write!(f, "bad script step '{s}', expected keys:ticks"),
            Self::UnknownKey(k) => write!(f, "unknown key '{k}'"),
            Self::BadTicks(t) => write!(f, "bad tick count '{t}'"),
        }
    }
}

impl std::error::Error for ScriptError {}

/// One scripted stretch of input: `keys` for `ticks` frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub keys: InputState,
    pub ticks: usize,
}

/// Parse `keys:ticks[,keys:ticks...]`, where `keys` is `idle` or a `+`-joined
/// list of `left`, `right`, `down`, `jump`, `reset`, `quit`.
pub fn parse(script: &str) -> Result<Vec<Step>, ScriptError> {
    script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_step)
        .collect()
}

fn parse_step(step: &str) -> Result<Step, ScriptError> {
    let (keys, ticks) = step
        .split_once(':')
        .ok_or_else(|| ScriptError::BadStep(step.to_string()))?;
    let ticks = ticks
        .trim()
        .parse::<usize>()
        .map_err(|_| ScriptError::BadTicks(ticks.to_string()))?;

    let mut input = InputState::default();
    for key in keys.split('+').map(str::trim) {
        match key {
            "idle" => {},
            "left" => input.left = true,
            "right" => input.right = true,
            "down" => input.down = true,
            "jump" => input.jump = true,
            "reset" => input.reset = true,
            "quit" => input.quit = true,
            other => return Err(ScriptError::UnknownKey(other.to_string())),
        }
    }
    Ok(Step { keys: input, ticks })
}

/// Expand steps into one input per frame. Presses (jump, reset, quit) fire on
/// the first frame of their step only; held keys last the whole step.
pub fn frames(steps: &[Step]) -> Vec<InputState> {
    let mut out = Vec::new();
    for step in steps {
        for i in 0..step.ticks {
            let mut input = step.keys;
            if i > 0 {
                input.jump = false;
                input.reset = false;
                input.quit = false;
            }
            out.push(input);
        }
    }
    out
}
