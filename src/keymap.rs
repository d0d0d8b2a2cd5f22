use sdl2::{event::Event, keyboard::Keycode};

/// Makes dealing with SDL keymapping less verbose
macro_rules! map_keys {
    // entry point
    ($event:expr, $($input:tt)*) => {
        map_keys!(@inner $event, parsed=[], rest=[ $($input)* ])
    };

    // stop condition
    (@inner $event:expr, parsed = [$($parsed:tt)*], rest = [ ]) => {
        match $event {
            $($parsed)*
            _ => None
        }
    };

    // normal keydown
    (   @inner
        $event:expr,
        parsed = [$($parsed:tt)*],
        rest = [
            $keycode:pat => $action:expr,
            $($rest:tt)*
        ]
    ) => {
        map_keys!(
            @inner
            $event,
            parsed = [
                $($parsed)*
                Event::KeyDown {keycode: Some($keycode), repeat: false, .. } => Some($action),
            ],
            rest = [
                $($rest)*
            ]
        )
    };
}

/// Key bindings of the window frontend
pub enum Keymap {
    Default,
}

/// Actions to be executed by the application
pub enum Action {
    TogglePause,
    Step,
    Quit,
}

impl Keymap {
    /// Translate and SDL2 event into an action to be executed by the app
    pub fn translate_action(&self, event: &Event) -> Option<Action> {
        match self {
            Keymap::Default => map_keys!(event,
                Keycode::Space => Action::TogglePause,
                Keycode::N => Action::Step,
                Keycode::Escape => Action::Quit,
            ),
        }
    }
}
