use xcrypt_rs::app::App;

fn main() -> anyhow::Result<()> {
    App::init()?.execute()
}
