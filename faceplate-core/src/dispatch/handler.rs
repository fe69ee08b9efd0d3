use faceplate_types::{
    ConfirmationScreen, EditName, EditNameChangeChar, EditNameSelectChar, EnumParamUpdate,
    Envelope, HomeScreen, LayerStatus, LeftStatus, ListItems, ListSelectItem, MidiStatus,
    ParamUpdate, ParamValueUpdate, SoftButtons, SoftButtonsState, SystemColour, TempoStatus,
    WarningScreen,
};

/// The rendering layer's side of the UI-state protocol: one method per
/// envelope kind.
///
/// Every update carries full state for its area, so implementations re-apply
/// it idempotently. Empty text fields mean "leave unchanged".
pub trait UiEventHandler {
    fn set_left_status(&mut self, msg: &LeftStatus);
    fn set_layer_status(&mut self, msg: &LayerStatus);
    fn set_midi_status(&mut self, msg: &MidiStatus);
    fn set_tempo_status(&mut self, msg: &TempoStatus);
    fn show_home_screen(&mut self, msg: &HomeScreen);
    fn show_list_items(&mut self, msg: &ListItems);
    fn list_select_item(&mut self, msg: &ListSelectItem);
    fn set_soft_buttons(&mut self, msg: &SoftButtons);
    fn soft_buttons_state(&mut self, msg: &SoftButtonsState);
    fn param_update(&mut self, msg: &ParamUpdate);
    fn param_value_update(&mut self, msg: &ParamValueUpdate);
    fn enum_param_update(&mut self, msg: &EnumParamUpdate);
    fn enum_param_update_value(&mut self, msg: &ListSelectItem);
    fn edit_name(&mut self, msg: &EditName);
    fn edit_name_select_char(&mut self, msg: &EditNameSelectChar);
    fn edit_name_change_char(&mut self, msg: &EditNameChangeChar);
    fn show_confirmation_screen(&mut self, msg: &ConfirmationScreen);
    fn show_warning_screen(&mut self, msg: &WarningScreen);
    fn clear_boot_warning_screen(&mut self);
    fn set_system_colour(&mut self, msg: &SystemColour);
}

/// Hand an envelope to the matching handler method.
pub fn route<H: UiEventHandler + ?Sized>(envelope: &Envelope, handler: &mut H) {
    match envelope {
        Envelope::LeftStatus(msg) => handler.set_left_status(msg),
        Envelope::LayerStatus(msg) => handler.set_layer_status(msg),
        Envelope::MidiStatus(msg) => handler.set_midi_status(msg),
        Envelope::TempoStatus(msg) => handler.set_tempo_status(msg),
        Envelope::HomeScreen(msg) => handler.show_home_screen(msg),
        Envelope::ListItems(msg) => handler.show_list_items(msg),
        Envelope::ListSelectItem(msg) => handler.list_select_item(msg),
        Envelope::SoftButtons(msg) => handler.set_soft_buttons(msg),
        Envelope::SoftButtonsState(msg) => handler.soft_buttons_state(msg),
        Envelope::ParamUpdate(msg) => handler.param_update(msg),
        Envelope::ParamValueUpdate(msg) => handler.param_value_update(msg),
        Envelope::EnumParamUpdate(msg) => handler.enum_param_update(msg),
        Envelope::EnumParamUpdateValue(msg) => handler.enum_param_update_value(msg),
        Envelope::EditName(msg) => handler.edit_name(msg),
        Envelope::EditNameSelectChar(msg) => handler.edit_name_select_char(msg),
        Envelope::EditNameChangeChar(msg) => handler.edit_name_change_char(msg),
        Envelope::ConfirmationScreen(msg) => handler.show_confirmation_screen(msg),
        Envelope::WarningScreen(msg) => handler.show_warning_screen(msg),
        Envelope::ClearBootWarning => handler.clear_boot_warning_screen(),
        Envelope::SystemColour(msg) => handler.set_system_colour(msg),
    }
}
