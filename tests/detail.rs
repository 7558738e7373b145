use wcls::model::{
    CompletionDetail, EntryKind, QuickInfo, SymbolDisplayPart, TextSpan,
};
use wcls::service::{Enhancer, LanguageHost};

const COMPONENT: &str = r#"
@Component({ tag: 'my-counter' })
export class MyCounter {
  @State() count: number;
  @Prop() label: string;

  @Watch('label')
  onLabelChange() {}

  @Listen('click')
  @Listen('keydown')
  handleInput() {}

  helper() {}

  render() {
    return null;
  }

  componentDidLoad() {}
}
"#;

struct FakeHost {
    source: String,
    detail_calls: usize,
    quick_info_calls: usize,
}

impl FakeHost {
    fn new(source: &str) -> Self {
        FakeHost {
            source: source.to_string(),
            detail_calls: 0,
            quick_info_calls: 0,
        }
    }
}

fn raw_detail(name: &str, kind: EntryKind) -> CompletionDetail {
    let role = match kind {
        EntryKind::Property => "property",
        _ => "method",
    };
    CompletionDetail {
        name: name.to_string(),
        kind,
        kind_modifiers: String::new(),
        display_parts: vec![
            SymbolDisplayPart::punctuation("("),
            SymbolDisplayPart::text(role),
            SymbolDisplayPart::punctuation(")"),
            SymbolDisplayPart::space(),
            SymbolDisplayPart::new(name, "propertyName"),
        ],
        documentation: Vec::new(),
    }
}

impl LanguageHost for FakeHost {
    fn source_text(&mut self, _file: &str) -> Option<String> {
        Some(self.source.clone())
    }

    fn completions(&mut self, _file: &str, _position: usize) -> Option<wcls::model::CompletionList> {
        None
    }

    fn completion_detail(
        &mut self,
        _file: &str,
        _position: usize,
        name: &str,
    ) -> Option<CompletionDetail> {
        self.detail_calls += 1;
        let kind = match name {
            "count" | "label" => EntryKind::Property,
            _ => EntryKind::Method,
        };
        Some(raw_detail(name, kind))
    }

    fn quick_info(&mut self, _file: &str, position: usize) -> Option<QuickInfo> {
        self.quick_info_calls += 1;
        Some(QuickInfo {
            kind: EntryKind::Method,
            text_span: TextSpan::new(position, 1),
            display_parts: Vec::new(),
            documentation: Vec::new(),
        })
    }

    fn references(
        &mut self,
        _file: &str,
        _position: usize,
    ) -> Option<Vec<wcls::model::ReferenceEntry>> {
        None
    }

    fn rename_locations(
        &mut self,
        _file: &str,
        _position: usize,
        _include_strings: bool,
        _include_comments: bool,
    ) -> Option<Vec<wcls::model::RenameLocation>> {
        None
    }
}

fn rendered(parts: &[SymbolDisplayPart]) -> String {
    parts.iter().map(|part| part.text.as_str()).collect()
}

#[test]
fn state_detail_gets_badge_and_type_line() {
    let mut enhancer = Enhancer::new(FakeHost::new(COMPONENT)).unwrap();
    let detail = enhancer
        .completion_detail("my-counter.tsx", 10, "count")
        .unwrap();
    assert_eq!(rendered(&detail.display_parts), "(state) count");
    assert_eq!(rendered(&detail.documentation), "Type: number");
}

#[test]
fn watch_detail_gets_badge_and_rendered_annotation() {
    let mut enhancer = Enhancer::new(FakeHost::new(COMPONENT)).unwrap();
    let detail = enhancer
        .completion_detail("my-counter.tsx", 10, "onLabelChange")
        .unwrap();
    assert_eq!(rendered(&detail.display_parts), "(watch) onLabelChange");
    assert_eq!(rendered(&detail.documentation), "@Watch('label')");
}

#[test]
fn listen_detail_gets_one_badge_per_event() {
    let mut enhancer = Enhancer::new(FakeHost::new(COMPONENT)).unwrap();
    let detail = enhancer
        .completion_detail("my-counter.tsx", 10, "handleInput")
        .unwrap();
    assert_eq!(
        rendered(&detail.display_parts),
        "(listen: click) (listen: keydown) handleInput"
    );
}

#[test]
fn lifecycle_detail_appends_fixed_documentation() {
    let mut enhancer = Enhancer::new(FakeHost::new(COMPONENT)).unwrap();
    let detail = enhancer
        .completion_detail("my-counter.tsx", 10, "componentDidLoad")
        .unwrap();
    // The display keeps the host's rendering; only documentation is added.
    assert_eq!(rendered(&detail.display_parts), "(method) componentDidLoad");
    assert!(rendered(&detail.documentation).contains("first render"));
}

#[test]
fn unmatched_name_passes_through_unchanged() {
    let mut enhancer = Enhancer::new(FakeHost::new(COMPONENT)).unwrap();
    let detail = enhancer
        .completion_detail("my-counter.tsx", 10, "inherited")
        .unwrap();
    assert_eq!(detail, raw_detail("inherited", EntryKind::Method));
}

#[test]
fn detail_is_cached_per_position_scope() {
    let mut enhancer = Enhancer::new(FakeHost::new(COMPONENT)).unwrap();
    let first = enhancer
        .completion_detail("my-counter.tsx", 10, "count")
        .unwrap();
    let second = enhancer
        .completion_detail("my-counter.tsx", 10, "count")
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(enhancer.host_mut().detail_calls, 1);

    // A new position opens a new scope and recomputes.
    enhancer.completion_detail("my-counter.tsx", 20, "count").unwrap();
    assert_eq!(enhancer.host_mut().detail_calls, 2);
    enhancer.completion_detail("my-counter.tsx", 10, "count").unwrap();
    assert_eq!(enhancer.host_mut().detail_calls, 3);
}

#[test]
fn quick_info_injects_lifecycle_docs_and_caches_by_span() {
    let position = COMPONENT.find("componentDidLoad").unwrap() + 2;
    let mut enhancer = Enhancer::new(FakeHost::new(COMPONENT)).unwrap();
    let info = enhancer.quick_info("my-counter.tsx", position).unwrap();
    assert!(rendered(&info.documentation).contains("first render"));
    assert_eq!(enhancer.host_mut().quick_info_calls, 1);

    // Another position inside the same identifier maps to the same node
    // span, so the host is not consulted again.
    let again = enhancer.quick_info("my-counter.tsx", position + 3).unwrap();
    assert_eq!(info, again);
    assert_eq!(enhancer.host_mut().quick_info_calls, 1);
}

#[test]
fn quick_info_injects_builtin_docs() {
    let position = COMPONENT.find("render").unwrap() + 1;
    let mut enhancer = Enhancer::new(FakeHost::new(COMPONENT)).unwrap();
    let info = enhancer.quick_info("my-counter.tsx", position).unwrap();
    assert!(rendered(&info.documentation).contains("virtual DOM"));
}
