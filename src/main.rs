use log_helper::{
    log_error, log_info, logf_critical, logf_debug, logf_error, logf_info, logf_to, logf_warning,
    FormatElement, Level, LogHelper, DEFAULT_LOG_HELPER,
};
use tracing_subscriber::EnvFilter;

fn print_first(message: &str, _level: Level, _time: &str, _file: &str, _line: u32, _func: &str) {
    println!("1: {}", message);
}

fn print_second(message: &str, _level: Level, _time: &str, _file: &str, _line: u32, _func: &str) {
    println!("2: {}", message);
}

fn basics() {
    logf_debug!("one {} and {} bananas", "apple", 5);
    log_info!("this is without args");
    logf_warning!("you are about to get {} errors", 2);
    logf_error!("error no {} of {}", 1, 2);
    log_error!("the second error, {} stays literal");
    logf_critical!("one critical {}", "situation");
    logf_to!(DEFAULT_LOG_HELPER, Level::Info, "{} here", "log");
}

fn message_formatting() {
    log_info!("this is with default formatting");
    log_helper::set_message_format(&[FormatElement::Filename, FormatElement::Level, FormatElement::Time]);
    log_info!("this is with modified format specs");
    log_helper::set_message_format(&[]);
    log_info!("this is without format specs");
    log_helper::set_message_format(&log_helper::DEFAULT_MESSAGE_FORMAT);
}

fn time_formatting() {
    log_helper::set_message_format(&[FormatElement::Time]);
    log_info!("this is with the default time format");
    log_helper::set_time_format("%a %e %b %H:%M:%S");
    log_info!("this is with a modified time format");
    log_helper::set_time_format("%c");
    logf_info!("the current time format string is '{}'", log_helper::time_format());
    log_helper::set_time_format(log_helper::DEFAULT_TIME_FORMAT);
    log_helper::set_message_format(&log_helper::DEFAULT_MESSAGE_FORMAT);
}

fn function_with_own_logging() {
    let special = LogHelper::new();
    special.set_message_format(&[FormatElement::Time, FormatElement::Level]);
    special.register_callback(print_second);
    log_info!("log from inside this function");
    // `special` is dropped here and takes its handler with it
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let id = log_helper::register_callback(print_first);

    basics();
    message_formatting();
    time_formatting();
    function_with_own_logging();
    log_info!("after function_with_own_logging");

    log_helper::unregister_callback(id);
    log_info!("nobody listens to this one");
    println!("done");
}
