//! Type definitions and enums for the application state and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    MainMenu(MainMenuItem),
    /// Rules of the game.
    HowToPlay,
    /// Name entry and colour choice before a game starts.
    Register,
    /// In-game maze screen where the player walks and collects coins.
    InGame,
    /// Best completion times.
    ScoreBoard,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    StartGame,
    /// "How to Play" menu option.
    HowToPlay,
    /// "Score Board" menu option.
    ScoreBoard,
    /// "Quit" menu option.
    Quit,
}

impl MainMenuItem {
    /// Every item in the order it is listed.
    pub(crate) const ALL: [Self; 4] = [
        Self::StartGame,
        Self::HowToPlay,
        Self::ScoreBoard,
        Self::Quit,
    ];

    /// Returns the label shown in the menu.
    pub(crate) const fn repr(self) -> &'static str {
        match self {
            Self::StartGame => "Start Game",
            Self::HowToPlay => "How to Play",
            Self::ScoreBoard => "Score Board",
            Self::Quit => "Quit",
        }
    }

    /// Returns the item below this one; the last item stays put.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::StartGame => Self::HowToPlay,
            Self::HowToPlay => Self::ScoreBoard,
            Self::ScoreBoard | Self::Quit => Self::Quit,
        }
    }

    /// Returns the item above this one; the first item stays put.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::StartGame | Self::HowToPlay => Self::StartGame,
            Self::ScoreBoard => Self::HowToPlay,
            Self::Quit => Self::ScoreBoard,
        }
    }
}
