//! Shared harness: a mock panel on a random local port.

use std::time::Duration;

use pterodactyl_core::{PanelClient, UreqTransport};

pub const TOKEN: &str = "ptla_integration";

/// Start the mock panel on its own runtime thread and return its base URL.
pub fn spawn_panel() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, TOKEN).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

pub fn client(base_url: &str) -> PanelClient<UreqTransport> {
    PanelClient::builder()
        .base_url(base_url)
        .token(TOKEN)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
