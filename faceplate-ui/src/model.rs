use faceplate_core::dispatch::UiEventHandler;
use faceplate_core::scope::{DisplayMode, ScopeModeHandle, ScopeVisibility};
use faceplate_types::{
    ConfirmationScreen, EditName, EditNameChangeChar, EditNameSelectChar, EnumParamUpdate,
    HomeScreen, LayerStatus, LeftStatus, ListItems, ListSelectItem, MidiStatus, ParamUpdate,
    ParamValueUpdate, ScopeMode, SoftButtons, SoftButtonsState, SystemColour, TempoStatus,
    WarningScreen, EDIT_NAME_STR_LEN,
};

/// Which main-area screen is up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Boot,
    Home,
    List,
    Param,
    EnumParam,
    EditName,
    Confirmation,
    Warning,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub title: String,
    pub rows: Vec<String>,
    pub selected: Option<usize>,
}

/// In-memory display state, updated from UI-state events.
pub struct DisplayModel {
    pub screen: Screen,
    pub left_status: String,
    pub patch_modified: bool,
    pub layer_status: String,
    pub midi_active: bool,
    pub tempo: String,
    pub soft_buttons: [String; 3],
    pub soft_button_states: [i32; 3],
    pub list: ListView,
    pub param_value: String,
    pub edit_name: String,
    pub edit_cursor: usize,
    pub dialog: Option<(String, String)>,
    pub hourglass: bool,
    pub boot_warning: bool,
    pub system_colour: String,
    pub activity_count: u32,
    scope_mode: ScopeModeHandle,
    visibility: ScopeVisibility,
}

fn set_if_given(field: &mut String, value: &str) {
    if !value.is_empty() {
        *field = value.to_string();
    }
}

impl DisplayModel {
    pub fn new(scope_mode: ScopeModeHandle, visibility: ScopeVisibility) -> Self {
        Self {
            screen: Screen::default(),
            left_status: String::new(),
            patch_modified: false,
            layer_status: String::new(),
            midi_active: false,
            tempo: String::new(),
            soft_buttons: Default::default(),
            soft_button_states: [0; 3],
            list: ListView::default(),
            param_value: String::new(),
            edit_name: String::new(),
            edit_cursor: 0,
            dialog: None,
            hourglass: false,
            boot_warning: false,
            system_colour: String::new(),
            activity_count: 0,
            scope_mode,
            visibility,
        }
    }

    pub fn scope_shown(&self) -> bool {
        self.visibility.is_shown()
    }

    /// Place the scope for a screen change: foreground on the home screen,
    /// background behind a parameter, hidden otherwise.
    fn place_scope(&self, mode: Option<DisplayMode>) {
        match mode {
            Some(mode) if self.scope_mode.get() != ScopeMode::Off => {
                self.visibility.show_mode(mode)
            }
            _ => self.visibility.hide(true),
        }
    }

    fn show_list(&mut self, title: &str, rows: Vec<String>, selected: u32) {
        let selected = selected as usize;
        self.list = ListView {
            title: title.to_string(),
            selected: (selected < rows.len()).then_some(selected),
            rows,
        };
    }
}

impl UiEventHandler for DisplayModel {
    fn set_left_status(&mut self, msg: &LeftStatus) {
        set_if_given(&mut self.left_status, &msg.status);
    }

    fn set_layer_status(&mut self, msg: &LayerStatus) {
        set_if_given(&mut self.layer_status, &msg.status);
    }

    fn set_midi_status(&mut self, msg: &MidiStatus) {
        self.midi_active = msg.midi_active;
    }

    fn set_tempo_status(&mut self, msg: &TempoStatus) {
        set_if_given(&mut self.tempo, &msg.tempo);
    }

    fn show_home_screen(&mut self, msg: &HomeScreen) {
        self.scope_mode.set(msg.scope_mode);
        if !msg.patch_name.is_empty() {
            self.left_status = msg.patch_name.to_string();
            self.patch_modified = msg.patch_modified;
        }
        self.screen = Screen::Home;
        self.place_scope(Some(DisplayMode::Foreground));
    }

    fn show_list_items(&mut self, msg: &ListItems) {
        let rows = msg.items.iter().map(|e| e.label.to_string()).collect();
        self.show_list("", rows, msg.selected_item);
        self.screen = Screen::List;
        self.place_scope(None);
    }

    fn list_select_item(&mut self, msg: &ListSelectItem) {
        if (msg.selected_item as usize) < self.list.rows.len() {
            self.list.selected = Some(msg.selected_item as usize);
        }
    }

    fn set_soft_buttons(&mut self, msg: &SoftButtons) {
        for (slot, text) in self
            .soft_buttons
            .iter_mut()
            .zip([&msg.button1, &msg.button2, &msg.button3])
        {
            set_if_given(slot, text);
        }
    }

    fn soft_buttons_state(&mut self, msg: &SoftButtonsState) {
        self.soft_button_states = [msg.state_button1, msg.state_button2, msg.state_button3];
    }

    fn param_update(&mut self, msg: &ParamUpdate) {
        let rows = msg.items.iter().map(|e| e.label.to_string()).collect();
        self.show_list(&msg.name, rows, msg.selected_item);
        self.param_value = msg.display_string.to_string();
        self.screen = Screen::Param;
        self.place_scope(msg.show_scope.then_some(DisplayMode::Background));
    }

    fn param_value_update(&mut self, msg: &ParamValueUpdate) {
        self.param_value = msg.display_string.to_string();
        if msg.selected_item >= 0 && (msg.selected_item as usize) < self.list.rows.len() {
            self.list.selected = Some(msg.selected_item as usize);
        }
    }

    fn enum_param_update(&mut self, msg: &EnumParamUpdate) {
        let rows = msg.items.iter().map(|e| e.label.to_string()).collect();
        self.show_list(&msg.name, rows, msg.selected_item);
        self.screen = Screen::EnumParam;
        self.place_scope(None);
    }

    fn enum_param_update_value(&mut self, msg: &ListSelectItem) {
        self.list_select_item(msg);
    }

    fn edit_name(&mut self, msg: &EditName) {
        self.edit_name = msg.name.chars().take(EDIT_NAME_STR_LEN).collect();
        self.edit_cursor = 0;
        self.screen = Screen::EditName;
        self.place_scope(None);
    }

    fn edit_name_select_char(&mut self, msg: &EditNameSelectChar) {
        self.edit_cursor = (msg.selected_char as usize).min(EDIT_NAME_STR_LEN - 1);
    }

    fn edit_name_change_char(&mut self, msg: &EditNameChangeChar) {
        let Some(ch) = char::from_u32(msg.change_char) else {
            return;
        };
        let mut chars: Vec<char> = self.edit_name.chars().collect();
        if chars.len() <= self.edit_cursor {
            chars.resize(self.edit_cursor + 1, ' ');
        }
        chars[self.edit_cursor] = ch;
        self.edit_name = chars.into_iter().collect();
    }

    fn show_confirmation_screen(&mut self, msg: &ConfirmationScreen) {
        self.dialog = Some((msg.line_1.to_string(), msg.line_2.to_string()));
        self.screen = Screen::Confirmation;
    }

    fn show_warning_screen(&mut self, msg: &WarningScreen) {
        if msg.show {
            self.dialog = Some((msg.line_1.to_string(), msg.line_2.to_string()));
            self.hourglass = msg.show_hourglass;
            self.boot_warning = true;
            self.screen = Screen::Warning;
        } else {
            self.clear_boot_warning_screen();
        }
    }

    fn clear_boot_warning_screen(&mut self) {
        self.boot_warning = false;
        self.hourglass = false;
        self.dialog = None;
        if self.screen == Screen::Warning {
            self.screen = Screen::Boot;
        }
    }

    fn set_system_colour(&mut self, msg: &SystemColour) {
        set_if_given(&mut self.system_colour, &msg.colour);
    }
}
