//! Nests and eggs (read-only).

use crate::client::PanelClient;
use crate::error::Result;
use crate::models::{Egg, Nest};
use crate::transport::Transport;

impl<T: Transport> PanelClient<T> {
    pub fn get_nests(&self) -> Result<Vec<Nest>> {
        self.get_list("/nests")
    }

    pub fn get_nest(&self, nest_id: u32) -> Result<Nest> {
        self.get_one(&format!("/nests/{nest_id}"))
    }

    pub fn get_eggs(&self, nest_id: u32) -> Result<Vec<Egg>> {
        self.get_list(&format!("/nests/{nest_id}/eggs"))
    }

    pub fn get_egg(&self, nest_id: u32, egg_id: u32) -> Result<Egg> {
        self.get_one(&format!("/nests/{nest_id}/eggs/{egg_id}"))
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::{client, ScriptedTransport};

    #[test]
    fn egg_keeps_opaque_config() {
        let egg = r##"{"object":"egg","attributes":{"id":5,"uuid":"fb2b0f62-6f4e-4a2b-a9b5-1d1bd84a7f22","name":"Vanilla Minecraft","nest":1,"author":"support@pterodactyl.io","description":null,"docker_image":"quay.io/pterodactyl/core:java","config":{"files":{"server.properties":{"parser":"properties","find":{"server-port":"{{server.build.default.port}}"}}},"startup":{"done":")! For help, type ","userInteraction":[]},"stop":"stop","logs":{"custom":false,"location":"logs/latest.log"},"extends":null},"startup":"java -jar {{SERVER_JARFILE}}","script":{"privileged":true,"install":"#!/bin/ash","entry":"ash","container":"alpine:3.10","extends":null},"created_at":"2024-01-20T10:00:00+00:00","updated_at":"2024-01-20T10:00:00+00:00"}}"##;
        let c = client(ScriptedTransport::default().respond(200, egg));
        let decoded = c.get_egg(1, 5).unwrap();
        assert_eq!(decoded.config["stop"], "stop");
        assert!(decoded.docker_images.is_empty());
        assert!(decoded.script.privileged);
        assert_eq!(
            c.transport().last_request().url,
            "https://panel.example.com/api/application/nests/1/eggs/5"
        );
    }

    #[test]
    fn nests_list_in_order() {
        let list = r#"{"object":"list","data":[
            {"object":"nest","attributes":{"id":2,"uuid":"8ca1a4d5-0a2e-4b1b-9c7a-3f2b1c6e0f11","author":"support@pterodactyl.io","name":"Source Engine","description":null,"created_at":"2024-01-20T10:00:00+00:00","updated_at":"2024-01-20T10:00:00+00:00"}},
            {"object":"nest","attributes":{"id":1,"uuid":"3f2b1c6e-0a2e-4b1b-9c7a-8ca1a4d50f11","author":"support@pterodactyl.io","name":"Minecraft","description":"Minecraft - the classic game","created_at":"2024-01-20T10:00:00+00:00","updated_at":"2024-01-20T10:00:00+00:00"}}
        ]}"#;
        let c = client(ScriptedTransport::default().respond(200, list));
        let names: Vec<String> = c.get_nests().unwrap().into_iter().map(|n| n.name).collect();
        assert_eq!(names, ["Source Engine", "Minecraft"]);
    }
}
