use clap::App;
use clap::Arg;
use clap::ArgMatches;

pub fn init() -> ArgMatches<'static> {
    app().get_matches()
}

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn app() -> App<'static, 'static> {
    App::new("Engine Console")
        .version(VERSION)
        .name("engine-console")
        .about("A remote console for a running engine.  Sends script and command input, and prints engine output.")
        .after_help(
            "Console directives: :script, :command, :mode <script|command>, :connect [host:port], :disconnect, :complete <prefix>, :quit",
        )
        .arg(
            Arg::with_name("HOST")
                .long("host")
                .required(false)
                .takes_value(true)
                .help("The engine host.  Defaults to the config file, or 127.0.0.1"),
        )
        .arg(
            Arg::with_name("PORT")
                .long("port")
                .short("p")
                .required(false)
                .takes_value(true)
                .validator(|port| {
                    port.parse::<u16>()
                        .map(|_| ())
                        .map_err(|_| format!("invalid port: {}", port))
                })
                .help("The engine console port.  Defaults to the config file, or 10001"),
        )
        .arg(
            Arg::with_name("MODE")
                .long("mode")
                .short("m")
                .required(false)
                .takes_value(true)
                .possible_values(&["script", "command"])
                .help("The initial input mode"),
        )
        .arg(
            Arg::with_name("LOG")
                .long("log")
                .required(false)
                .takes_value(true)
                .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
                .help("Sets the log level"),
        )
        .arg(
            Arg::with_name("COMPLETE")
                .long("complete")
                .required(false)
                .takes_value(true)
                .value_name("PREFIX")
                .help("Prints the engine API entries matching the prefix, and exits"),
        )
}

#[cfg(test)]
mod tests {
    use super::app;

    #[test]
    fn parses_overrides() {
        let args = app()
            .get_matches_from_safe(vec![
                "engine-console",
                "--host",
                "10.0.0.2",
                "--port",
                "12000",
                "--mode",
                "command",
            ])
            .unwrap();

        assert_eq!(Some("10.0.0.2"), args.value_of("HOST"));
        assert_eq!(Some("12000"), args.value_of("PORT"));
        assert_eq!(Some("command"), args.value_of("MODE"));
    }

    #[test]
    fn rejects_invalid_port() {
        let result = app().get_matches_from_safe(vec!["engine-console", "--port", "http"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_mode() {
        let result = app().get_matches_from_safe(vec!["engine-console", "--mode", "lua"]);
        assert!(result.is_err());
    }
}
