//! Smile (emoticon) catalog.

use serde::Serialize;

/// A catalogued smile.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Smile {
    /// Catalog name as written in `[smile=name]`
    pub name: &'static str,
    /// Asset path relative to the smile bundle
    pub asset: &'static str,
    /// Text shown when the asset cannot be displayed
    pub alt: &'static str,
}

impl Smile {
    const fn new(name: &'static str, asset: &'static str, alt: &'static str) -> Self {
        Self { name, asset, alt }
    }
}

/// Catalog entries, sorted by name for binary search.
static SMILES: &[Smile] = &[
    Smile::new("acute", "smiles/acute.gif", ";)"),
    Smile::new("aggressive", "smiles/aggressive.gif", ">:("),
    Smile::new("angel", "smiles/angel.gif", "O:-)"),
    Smile::new("bad", "smiles/bad.gif", ":-!"),
    Smile::new("beer", "smiles/beer.gif", "[_]"),
    Smile::new("biggrin", "smiles/biggrin.gif", ":D"),
    Smile::new("blink", "smiles/blink.gif", "o_O"),
    Smile::new("blush", "smiles/blush.gif", ":-["),
    Smile::new("bomb", "smiles/bomb.gif", "*BOMB*"),
    Smile::new("boredom", "smiles/boredom.gif", ":-/"),
    Smile::new("bye", "smiles/bye.gif", ":bye:"),
    Smile::new("clapping", "smiles/clapping.gif", ":clap:"),
    Smile::new("cool", "smiles/cool.gif", "B)"),
    Smile::new("crazy", "smiles/crazy.gif", "%)"),
    Smile::new("cry", "smiles/cry.gif", ":'("),
    Smile::new("dance", "smiles/dance.gif", ":dance:"),
    Smile::new("dash", "smiles/dash.gif", ":dash:"),
    Smile::new("diablo", "smiles/diablo.gif", "]:->"),
    Smile::new("dirol", "smiles/dirol.gif", "8-)"),
    Smile::new("drinks", "smiles/drinks.gif", ":drink:"),
    Smile::new("dry", "smiles/dry.gif", "<_<"),
    Smile::new("good", "smiles/good.gif", ":good:"),
    Smile::new("happy", "smiles/happy.gif", "^_^"),
    Smile::new("heart", "smiles/heart.gif", "<3"),
    Smile::new("help", "smiles/help.gif", ":help:"),
    Smile::new("huh", "smiles/huh.gif", ":huh:"),
    Smile::new("laugh", "smiles/laugh.gif", ":lol:"),
    Smile::new("mad", "smiles/mad.gif", ":mad:"),
    Smile::new("mellow", "smiles/mellow.gif", ":mellow:"),
    Smile::new("no", "smiles/no.gif", ":no:"),
    Smile::new("ohmy", "smiles/ohmy.gif", ":o"),
    Smile::new("pardon", "smiles/pardon.gif", ":pardon:"),
    Smile::new("rofl", "smiles/rofl.gif", ":rofl:"),
    Smile::new("rolleyes", "smiles/rolleyes.gif", "8)"),
    Smile::new("sad", "smiles/sad.gif", ":("),
    Smile::new("scare", "smiles/scare.gif", ":scare:"),
    Smile::new("shock", "smiles/shock.gif", "O_O"),
    Smile::new("shout", "smiles/shout.gif", ":shout:"),
    Smile::new("smile", "smiles/smile.gif", ":)"),
    Smile::new("sorry", "smiles/sorry.gif", ":sorry:"),
    Smile::new("thank_you", "smiles/thank_you.gif", ":thanks:"),
    Smile::new("tongue", "smiles/tongue.gif", ":P"),
    Smile::new("unsure", "smiles/unsure.gif", ":unsure:"),
    Smile::new("wacko", "smiles/wacko.gif", ":wacko:"),
    Smile::new("wink", "smiles/wink.gif", ";-)"),
    Smile::new("yes", "smiles/yes.gif", ":yes:"),
];

/// Look up a smile by catalog name (case-insensitive).
pub fn lookup(name: &str) -> Option<&'static Smile> {
    let key = name.trim().to_ascii_lowercase();
    SMILES
        .binary_search_by(|smile| smile.name.cmp(key.as_str()))
        .ok()
        .map(|idx| &SMILES[idx])
}

/// All catalogued smiles.
pub fn all() -> &'static [Smile] {
    SMILES
}
