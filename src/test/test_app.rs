
mod test {
    use std::env;
    use std::fs;

    use rand::rngs::StdRng;
    use rstest::rstest;

    use crate::app::{App, Page, QuizConfig, QuizPage};
    use crate::command::{CommandError, QuizCommand, parse_command};
    use crate::models::Tone;
    use crate::test::test_util::seeded_rng;

    fn app() -> App<StdRng> {
        App::new(QuizConfig::default(), seeded_rng(7))
    }

    fn tone_after(app: &mut App<StdRng>, line: &str) -> Tone {
        app.handle_line(line);
        app.message().expect("every line leaves feedback").tone
    }

    #[rstest]
    #[case("2", QuizCommand::Open(2))]
    #[case("node", QuizCommand::AddNode(None))]
    #[case("n Akita", QuizCommand::AddNode(Some("Akita".into())))]
    #[case(
        "EDGE A B 12",
        QuizCommand::AddEdge { from: "A".into(), to: "B".into(), value: "12".into() }
    )]
    #[case(
        "ask S T 15",
        QuizCommand::Ask { source: "S".into(), target: "T".into(), guess: 15 }
    )]
    #[case("  g 7 ", QuizCommand::Generate(7))]
    #[case("retry", QuizCommand::Retry)]
    #[case("rebuild", QuizCommand::Rebuild)]
    #[case("export", QuizCommand::Export)]
    #[case("close", QuizCommand::Close)]
    #[case("home", QuizCommand::Menu)]
    #[case("q", QuizCommand::Quit)]
    fn commands_parse(#[case] line: &str, #[case] expected: QuizCommand) {
        assert_eq!(parse_command(line), Ok(expected));
    }

    #[rstest]
    #[case("", CommandError::Empty)]
    #[case("fly A B", CommandError::Unknown("fly A B".into()))]
    #[case(
        "ask S T",
        CommandError::WrongArguments {
            command: "ask",
            expected: "a start node, an end node and a guess",
        }
    )]
    #[case("ask S T -3", CommandError::InvalidNumber { value: "-3".into() })]
    #[case("gen many", CommandError::InvalidNumber { value: "many".into() })]
    #[case(
        "node two words",
        CommandError::WrongArguments {
            command: "node",
            expected: "at most one label without spaces",
        }
    )]
    fn bad_commands_are_rejected(#[case] line: &str, #[case] expected: CommandError) {
        assert_eq!(parse_command(line), Err(expected));
    }

    #[test]
    fn home_menu_opens_quizzes_by_number() {
        let mut app = app();
        assert_eq!(app.page(), Page::Home);
        assert!(app.render_state("").body.contains("Max flow (random)"));

        assert_eq!(tone_after(&mut app, "9"), Tone::Warning);
        assert_eq!(tone_after(&mut app, "ask A B 1"), Tone::Warning);
        assert_eq!(app.page(), Page::Home);

        assert_eq!(tone_after(&mut app, "1"), Tone::Info);
        assert_eq!(app.page(), Page::Quiz(QuizPage::PathExample));
        assert_eq!(app.render_state("").title, "Shortest path (example)");
    }

    #[test]
    fn example_page_walks_through_answer_and_retry() {
        let mut app = app();
        app.open(QuizPage::PathExample).expect("example opens");

        assert_eq!(tone_after(&mut app, "ask Start Goal 105"), Tone::Success);
        assert!(app.render_state("").body.contains("Start -> Senboku -> Daisen -> Goal"));
        assert_eq!(tone_after(&mut app, "ask Start Goal 105"), Tone::Warning);
        assert_eq!(tone_after(&mut app, "retry"), Tone::Info);
        assert_eq!(tone_after(&mut app, "ask Start Goal 90"), Tone::Error);
        assert_eq!(tone_after(&mut app, "rebuild"), Tone::Warning);
        assert_eq!(tone_after(&mut app, "node X"), Tone::Warning);
    }

    #[test]
    fn same_endpoints_are_a_warning() {
        let mut app = app();
        app.open(QuizPage::FlowExample).expect("example opens");

        assert_eq!(tone_after(&mut app, "ask S S 0"), Tone::Warning);
        let id = app.session_id(QuizPage::FlowExample).expect("session open");
        assert_eq!(app.registry().flow(id).expect("flow session").oracle_calls(), 0);
    }

    #[test]
    fn builder_page_accepts_nodes_and_edges() {
        let mut app = app();
        app.open(QuizPage::FlowBuilder).expect("builder opens");

        assert_eq!(tone_after(&mut app, "node"), Tone::Success);
        assert_eq!(tone_after(&mut app, "node"), Tone::Success);
        assert_eq!(tone_after(&mut app, "node C"), Tone::Success);
        assert_eq!(tone_after(&mut app, "edge A B 2.5"), Tone::Warning);
        assert_eq!(tone_after(&mut app, "edge A B 6"), Tone::Success);
        assert_eq!(tone_after(&mut app, "edge B C 4"), Tone::Success);
        assert_eq!(tone_after(&mut app, "edge A Z 4"), Tone::Warning);
        assert_eq!(tone_after(&mut app, "gen 6"), Tone::Warning);

        assert_eq!(tone_after(&mut app, "ask A C 4"), Tone::Success);
        assert_eq!(tone_after(&mut app, "rebuild"), Tone::Info);

        let id = app.session_id(QuizPage::FlowBuilder).expect("session open");
        assert!(app.registry().flow(id).expect("flow session").graph().is_empty());
    }

    #[test]
    fn builder_honours_configured_node_limit() {
        let config = QuizConfig {
            max_builder_nodes: 2,
            ..QuizConfig::default()
        };
        let mut app = App::new(config, seeded_rng(1));
        app.open(QuizPage::PathBuilder).expect("builder opens");

        assert_eq!(tone_after(&mut app, "node"), Tone::Success);
        assert_eq!(tone_after(&mut app, "node"), Tone::Success);
        assert_eq!(tone_after(&mut app, "node"), Tone::Warning);
        assert!(app.message().expect("feedback").text.contains("limit is 2"));
    }

    #[test]
    fn random_page_generates_on_open_and_on_request() {
        let mut app = app();
        app.open(QuizPage::PathRandom).expect("random opens");
        let id = app.session_id(QuizPage::PathRandom).expect("session open");
        assert_eq!(app.registry().path(id).expect("path session").graph().node_count(), 6);

        assert_eq!(tone_after(&mut app, "gen 4"), Tone::Warning);
        assert_eq!(tone_after(&mut app, "gen 10"), Tone::Success);
        assert_eq!(app.registry().path(id).expect("path session").graph().node_count(), 10);
        assert_eq!(tone_after(&mut app, "node"), Tone::Warning);

        assert_eq!(tone_after(&mut app, "rebuild"), Tone::Info);
        assert_eq!(app.registry().path(id).expect("path session").graph().node_count(), 6);
    }

    #[test]
    fn pages_keep_their_own_sessions() {
        let mut app = app();
        app.handle_line("1");
        app.handle_line("ask Start Goal 105");
        app.handle_line("menu");
        app.handle_line("3");
        app.handle_line("menu");
        app.handle_line("1");

        let example = app.session_id(QuizPage::PathExample).expect("open");
        let builder = app.session_id(QuizPage::PathBuilder).expect("open");
        assert_ne!(example, builder);
        assert!(app.registry().path(example).expect("path").is_answered());
        assert!(app.registry().path(builder).expect("path").graph().is_empty());
        assert_eq!(app.registry().len(), 2);
    }

    #[test]
    fn export_writes_session_json() {
        let dir = env::temp_dir().join(format!("network-quiz-export-{}", std::process::id()));
        let config = QuizConfig {
            export_dir: dir.clone(),
            ..QuizConfig::default()
        };
        let mut app = App::new(config, seeded_rng(3));
        app.open(QuizPage::FlowExample).expect("example opens");
        app.handle_line("ask S T 15");

        assert_eq!(tone_after(&mut app, "export"), Tone::Info);

        let raw = fs::read_to_string(dir.join("session.json")).expect("export written");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(json["kind"], "max-flow");
        assert_eq!(json["directed"], true);
        assert_eq!(json["verdict"]["expected"], 15);
        assert_eq!(json["oracle_calls"], 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn close_discards_the_quiz_on_screen() {
        let mut app = app();
        app.handle_line("2");
        app.handle_line("ask S T 15");
        let first = app.session_id(QuizPage::FlowExample).expect("open");
        assert!(app.render_state("").body.contains("Flow (used/capacity)"));
        app.handle_line("menu");
        assert!(app.render_state("").body.contains("1 quiz(zes) in progress"));
        app.handle_line("2");

        assert_eq!(tone_after(&mut app, "close"), Tone::Info);
        assert_eq!(app.page(), Page::Home);
        assert_eq!(app.session_id(QuizPage::FlowExample), None);
        assert!(app.registry().flow(first).is_err());
        assert!(app.registry().is_empty());
        assert!(!app.render_state("").body.contains("in progress"));

        app.handle_line("2");
        let second = app.session_id(QuizPage::FlowExample).expect("reopened");
        assert_ne!(first, second);
        assert!(!app.registry().flow(second).expect("fresh session").is_answered());
        assert_eq!(tone_after(&mut app, "menu"), Tone::Info);
        assert_eq!(tone_after(&mut app, "close"), Tone::Warning);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app();
        assert!(!app.should_quit());
        app.handle_line("quit");
        assert!(app.should_quit());
    }
}
