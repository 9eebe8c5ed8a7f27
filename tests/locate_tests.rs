use hpath::compute_hpath;
use hpath::document::document_model::NodeId;
use hpath::document::snapshot::{DocumentSnapshot, SnapshotNode};
use hpath::locate::path_builder::{are_similar, compute_step, is_clickable, locate};
use hpath::locate::step::{HPath, LocateOutcome, PathStep, TARGET_IS_NULL, TARGET_NOT_PRESENT};
use hpath::reduce::simplifier::SimplifierConfig;
use hpath::reduce_document;

use crate::common::fixtures::{doc, el, el_text, fixture_path, hpath_of, hpath_of_marked, page, text};

mod common;

// =========================================================================
// Step rules
// =========================================================================

#[test]
fn unique_clickable_text_is_an_anchored_step() {
    let doc = doc(page(vec![el_text("a", "Submit").attr("href", "#").as_target()]));
    assert_eq!(hpath_of_marked(&doc), "//a[text()=\"Submit\"]");
}

#[test]
fn repeated_clickable_text_falls_back_to_full_path() {
    let doc = doc(page(vec![el("ul").children(vec![
        el("li").child(el_text("a", "Edit").attr("href", "/1")),
        el("li").child(el_text("a", "Edit").attr("href", "/2").as_target()),
    ])]));

    assert_eq!(hpath_of_marked(&doc), "/html/body/ul/li[2]/a[text()=\"Edit\"]");
}

#[test]
fn clickable_text_looks_through_inline_formatting() {
    let doc = doc(page(vec![el("button")
        .children(vec![text("Sign "), el_text("b", "in")])
        .as_target()]));
    assert_eq!(hpath_of_marked(&doc), "//button[text()=\"Sign in\"]");
}

#[test]
fn button_with_structured_content_gets_a_bare_step() {
    let doc = doc(page(vec![el("button")
        .children(vec![el("img"), text("Go")])
        .as_target()]));
    assert_eq!(hpath_of_marked(&doc), "/html/body/button");
}

#[test]
fn submit_input_counts_as_clickable() {
    let doc = doc(page(vec![
        el("input").attr("type", "SUBMIT"),
        el("input").attr("type", "text"),
        el("a"),
    ]));
    let tree = reduce_document(&doc, &SimplifierConfig::default()).unwrap().unwrap();

    let ids: Vec<_> = [2, 3, 4]
        .into_iter()
        .map(|n| tree.find_by_origin(NodeId(n)).unwrap())
        .collect();
    assert!(is_clickable(&tree, ids[0]));
    assert!(!is_clickable(&tree, ids[1]));
    assert!(is_clickable(&tree, ids[2]));
}

#[test]
fn clickable_text_takes_priority_over_label() {
    let doc = doc(page(vec![
        el_text("label", "Saving").attr("for", "save"),
        el_text("button", "Save").attr("id", "save").as_target(),
    ]));
    assert_eq!(hpath_of_marked(&doc), "//button[text()=\"Save\"]");
}

#[test]
fn wrapping_label_skips_the_label_level() {
    let doc = doc(page(vec![
        el("label").children(vec![text("Name "), el("input")]),
        el("label").children(vec![text("Name "), el("input").as_target()]),
    ]));

    assert_eq!(
        hpath_of_marked(&doc),
        "/html/body/input[label()=\"Name\"]",
        "Label text is not unique, so the ascent continues above the label"
    );
}

#[test]
fn unique_wrapping_label_is_anchored() {
    let doc = doc(page(vec![el("label")
        .children(vec![text("Name "), el("input").as_target()])]));
    assert_eq!(hpath_of_marked(&doc), "//input[label()=\"Name\"]");
}

#[test]
fn for_label_names_the_control() {
    let doc = DocumentSnapshot::load(&fixture_path("form_page.json")).unwrap();
    assert_eq!(hpath_of_marked(&doc), "//input[label()=\"Email\"]");
}

#[test]
fn for_label_with_structured_content_falls_back_to_position() {
    let doc = doc(page(vec![
        el("label").attr("for", "q").children(vec![text("Query "), el("img")]),
        el("input").attr("id", "q").as_target(),
    ]));
    assert_eq!(hpath_of_marked(&doc), "/html/body/input");
}

#[test]
fn unique_table_caption_is_anchored() {
    let doc = doc(page(vec![el("table").children(vec![
        el_text("caption", "Results"),
        el("tr").child(el_text("td", "1")),
    ])]));

    assert_eq!(hpath_of(&doc, Some(NodeId(2))), "//table[caption()=\"Results\"]");
    assert_eq!(
        hpath_of(&doc, Some(NodeId(6))),
        "//table[caption()=\"Results\"]/tr/td",
        "Ascent stops at the anchored table"
    );
}

#[test]
fn repeated_table_caption_is_not_anchored() {
    let table = || {
        el("table").children(vec![
            el_text("caption", "Results"),
            el("tr").child(el_text("td", "1")),
        ])
    };
    let doc = doc(page(vec![table(), table()]));

    assert_eq!(
        hpath_of(&doc, Some(NodeId(8))),
        "/html/body/table[caption()=\"Results\"]"
    );
}

#[test]
fn fieldset_legend_is_anchored() {
    let doc = doc(page(vec![el("fieldset").children(vec![
        el_text("legend", "Shipping"),
        el("input").attr("name", "zip"),
    ])]));

    assert_eq!(hpath_of(&doc, Some(NodeId(2))), "//fieldset[legend()=\"Shipping\"]");
    assert_eq!(hpath_of(&doc, Some(NodeId(5))), "//fieldset[legend()=\"Shipping\"]/input");
}

#[test]
fn figure_caption_is_anchored() {
    let doc = doc(page(vec![el("figure")
        .children(vec![el("img"), el_text("figcaption", "Chart")])
        .as_target()]));
    assert_eq!(hpath_of_marked(&doc), "//figure[figCaption()=\"Chart\"]");
}

#[test]
fn similar_siblings_get_a_position() {
    let doc = doc(page(vec![el("ul").children(vec![
        el_text("li", "One"),
        el_text("li", "Two").as_target(),
        el_text("li", "Three"),
    ])]));
    assert_eq!(hpath_of_marked(&doc), "/html/body/ul/li[2]");
}

#[test]
fn position_ignores_other_tags() {
    let doc = doc(page(vec![
        el_text("h2", "Title"),
        el_text("p", "first"),
        el_text("h2", "Other"),
        el_text("p", "second").as_target(),
    ]));
    assert_eq!(hpath_of_marked(&doc), "/html/body/p[2]");
}

#[test]
fn text_node_step() {
    let doc = doc(page(vec![el_text("p", "Hello")]));
    assert_eq!(hpath_of(&doc, Some(NodeId(3))), "/html/body/p/text()");
}

#[test]
fn text_and_cdata_are_similar() {
    let doc = doc(page(vec![el("p").children(vec![
        text("a"),
        SnapshotNode::cdata("b"),
        el("br"),
        SnapshotNode::other(),
    ])]));
    let tree = reduce_document(&doc, &SimplifierConfig::default()).unwrap().unwrap();
    let node = |n: usize| tree.find_by_origin(NodeId(n)).unwrap();

    assert!(are_similar(&tree, node(3), node(4)));
    assert!(!are_similar(&tree, node(3), node(5)));
    assert!(!are_similar(&tree, node(4), node(6)));
}

#[test]
fn non_element_target_without_label_renders_bare_slash() {
    let doc = doc(page(vec![SnapshotNode::other()]));
    assert_eq!(hpath_of(&doc, Some(NodeId(2))), "/");
}

// =========================================================================
// Diagnostics
// =========================================================================

#[test]
fn null_target() {
    let doc = doc(page(vec![]));
    assert_eq!(hpath_of(&doc, None), TARGET_IS_NULL);

    let tree = reduce_document(&doc, &SimplifierConfig::default()).unwrap().unwrap();
    assert_eq!(locate(&tree, None), LocateOutcome::TargetIsNull);
}

#[test]
fn pruned_whitespace_target_is_not_present() {
    let doc = doc(page(vec![text("   "), el_text("p", "x")]));
    assert_eq!(hpath_of(&doc, Some(NodeId(2))), TARGET_NOT_PRESENT);
}

#[test]
fn spliced_wrapper_target_is_not_present() {
    let doc = doc(page(vec![el("div")
        .attr("class", "w")
        .child(el_text("p", "x"))
        .as_target()]));
    assert_eq!(hpath_of_marked(&doc), TARGET_NOT_PRESENT);
}

#[test]
fn folded_child_target_is_not_present() {
    let doc = doc(page(vec![el("section").at(0.0, 0.0, 10.0, 10.0).child(
        el("section")
            .at(0.0, 0.0, 10.0, 10.0)
            .child(el_text("p", "x"))
            .as_target(),
    )]));

    assert_eq!(hpath_of_marked(&doc), TARGET_NOT_PRESENT);
    assert_eq!(hpath_of(&doc, Some(NodeId(2))), "/html/body/section");
}

#[test]
fn fully_pruned_document_reports_not_present() {
    let doc = doc(el("html").child(text(" ")));
    let config = SimplifierConfig {
        removable_tags: vec!["html".to_string()],
        ..SimplifierConfig::default()
    };

    let run = compute_hpath(&doc, Some(NodeId(0)), &config).unwrap();
    assert_eq!(run.outcome, LocateOutcome::TargetNotPresent);
    assert_eq!(run.reduced_nodes, 0);
    assert_eq!(run.fingerprint, None);
}

// =========================================================================
// Fixture documents
// =========================================================================

#[test]
fn form_page_paths() {
    let doc = DocumentSnapshot::load(&fixture_path("form_page.json")).unwrap();

    assert_eq!(hpath_of(&doc, Some(NodeId(10))), "//button[text()=\"Sign up\"]");
    assert_eq!(hpath_of(&doc, Some(NodeId(3))), "/html/body/h1");
    assert_eq!(hpath_of(&doc, Some(NodeId(6))), "/html/body/form");
    assert_eq!(hpath_of(&doc, Some(NodeId(0))), "/html");
    assert_eq!(hpath_of(&doc, Some(NodeId(5))), TARGET_NOT_PRESENT, "Same-box wrapper");
    assert_eq!(hpath_of(&doc, Some(NodeId(2))), TARGET_NOT_PRESENT, "Whitespace");

    let run = compute_hpath(&doc, Some(NodeId(9)), &SimplifierConfig::default()).unwrap();
    assert_eq!(run.reduced_nodes, 10);
    assert!(run.fingerprint.is_some());
}

#[test]
fn list_page_paths() {
    let doc = DocumentSnapshot::load(&fixture_path("list_page.yaml")).unwrap();

    assert_eq!(hpath_of_marked(&doc), "/html/body/ul/li[3]");
    assert_eq!(hpath_of(&doc, Some(NodeId(3))), TARGET_NOT_PRESENT);
}

// =========================================================================
// Properties
// =========================================================================

fn mixed_page() -> DocumentSnapshot {
    doc(page(vec![
        el_text("a", "Home").attr("href", "/"),
        el("ul").children(vec![
            el("li").child(el_text("a", "Edit").attr("href", "/1")),
            el("li").child(el_text("a", "Edit").attr("href", "/2")),
        ]),
        el("form").children(vec![
            el_text("label", "Email").attr("for", "email"),
            el("input").attr("id", "email"),
            el("label").children(vec![text("Remember"), el("input").attr("type", "checkbox")]),
            el_text("button", "Send"),
        ]),
        el("table").children(vec![
            el_text("caption", "Totals"),
            el("tr").children(vec![el_text("td", "1"), el_text("td", "2")]),
        ]),
        el("div").attr("class", "wrap").child(el_text("p", "wrapped")),
        text("\n"),
    ]))
}

#[test]
fn every_reduced_node_can_be_located() {
    let doc = mixed_page();
    let tree = reduce_document(&doc, &SimplifierConfig::default()).unwrap().unwrap();

    for id in tree.ids() {
        let origin = tree.origin(id).expect("simplifier output keeps origins");
        let outcome = locate(&tree, Some(origin));
        assert!(outcome.is_located(), "{} was not located: {}", origin, outcome);
    }
}

#[test]
fn optimized_steps_are_globally_unique() {
    let doc = mixed_page();
    let tree = reduce_document(&doc, &SimplifierConfig::default()).unwrap().unwrap();

    let steps: Vec<PathStep> = tree.ids().map(|id| compute_step(&tree, id)).collect();
    let optimized: Vec<&PathStep> = steps.iter().filter(|s| s.optimized).collect();
    assert!(optimized.len() >= 4, "Fixture exercises several anchored steps");

    for step in optimized {
        let same = steps.iter().filter(|s| s.label == step.label).count();
        assert_eq!(same, 1, "{} is not unique", step.label);
    }
}

#[test]
fn path_rendering() {
    let plain = HPath::new(vec![
        PathStep::element("table", None),
        PathStep::text_node(),
    ]);
    assert_eq!(plain.to_string(), "/table/text()");
    assert!(!plain.is_anchored());

    assert_eq!(HPath::default().to_string(), "/");

    let outcome = LocateOutcome::Path(plain);
    assert_eq!(outcome.status(), "located");
    assert_eq!(LocateOutcome::TargetIsNull.status(), "null_target");
    assert_eq!(LocateOutcome::TargetNotPresent.status(), "not_present");
    assert_eq!(LocateOutcome::TargetNotPresent.path(), None);
}
