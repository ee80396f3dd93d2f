use faketerm_cli::app::Application;

fn main() {
    std::process::exit(Application::new().run());
}
