use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use faststyle::dom::{DocumentSettings, ElementRole, ElementSource, LinkState};
use faststyle::style::declaration::Origin;
use faststyle::style::declaration::PropertyWhitelist;
use faststyle::style::declaration::LINK_MATCH_ALL;
use faststyle::{
  ComputedStyle, Declaration, DeclarationBlock, Length, MatchResult, PropertyId, PropertyValue,
  Rgba, StyleEngine,
};
use std::sync::Arc;

#[derive(Default)]
struct BenchElement {
  tag: String,
  parent: Option<Box<BenchElement>>,
  resolved: Option<Arc<ComputedStyle>>,
}

impl ElementSource for BenchElement {
  fn tag_name(&self) -> &str {
    &self.tag
  }
  fn id(&self) -> Option<&str> {
    None
  }
  fn classes(&self) -> &[String] {
    &[]
  }
  fn attribute(&self, _name: &str) -> Option<&str> {
    None
  }
  fn role(&self) -> ElementRole {
    ElementRole::Generic
  }
  fn link_state(&self) -> LinkState {
    LinkState::NotInsideLink
  }
  fn parent(&self) -> Option<&Self> {
    self.parent.as_deref()
  }
  fn prev_sibling(&self) -> Option<&Self> {
    None
  }
  fn last_child(&self) -> Option<&Self> {
    None
  }
  fn resolved_style(&self) -> Option<Arc<ComputedStyle>> {
    self.resolved.clone()
  }
}

fn bench_blocks(block_count: usize) -> MatchResult {
  let mut matched = MatchResult::new();
  matched
    .add_block(
      DeclarationBlock::new(vec![
        Declaration::new(PropertyId::Display, PropertyValue::Keyword("block".into())),
        Declaration::new(PropertyId::MarginTop, PropertyValue::Length(Length::px(8.0))),
      ]),
      Origin::UserAgent,
      LINK_MATCH_ALL,
      PropertyWhitelist::None,
    )
    .unwrap();
  for i in 0..block_count {
    matched.add_author_block(DeclarationBlock::new(vec![
      Declaration::new(
        PropertyId::Color,
        PropertyValue::Color(Rgba::rgb((i * 37 % 256) as u8, 0, 0)),
      ),
      Declaration::new(PropertyId::FontSize, PropertyValue::Length(Length::px(14.0))),
      Declaration::new(
        PropertyId::Width,
        PropertyValue::Length(Length::percent(50.0)),
      ),
      Declaration::new(
        PropertyId::PaddingLeft,
        PropertyValue::Length(Length::px(i as f32)),
      ),
      Declaration::new(PropertyId::Opacity, PropertyValue::Number(0.9)),
    ]));
  }
  matched
}

fn element_with_parent(parent_style: Arc<ComputedStyle>) -> BenchElement {
  BenchElement {
    tag: "div".into(),
    parent: Some(Box::new(BenchElement {
      tag: "body".into(),
      resolved: Some(parent_style),
      ..BenchElement::default()
    })),
    ..BenchElement::default()
  }
}

fn bench_cascade(c: &mut Criterion) {
  let settings = DocumentSettings::default();
  let matched = bench_blocks(8);
  let parent = Arc::new(ComputedStyle::initial());

  c.bench_function("resolve_cold", |b| {
    let element = element_with_parent(Arc::clone(&parent));
    b.iter(|| {
      let mut engine = StyleEngine::new(settings);
      black_box(engine.resolve_style(&element, &matched))
    })
  });

  c.bench_function("resolve_cache_hit", |b| {
    let element = element_with_parent(Arc::clone(&parent));
    let mut engine = StyleEngine::new(settings);
    let _ = engine.resolve_style(&element, &matched);
    b.iter(|| black_box(engine.resolve_style(&element, &matched)))
  });

  c.bench_function("resolve_inherited_only", |b| {
    let mut engine = StyleEngine::new(settings);
    let warm = element_with_parent(Arc::clone(&parent));
    let _ = engine.resolve_style(&warm, &matched);
    // Different parent inherited data forces the partial path.
    let mut other_parent = ComputedStyle::initial();
    other_parent.set_color(Rgba::rgb(0, 0, 200));
    let element = element_with_parent(Arc::new(other_parent));
    b.iter(|| black_box(engine.resolve_style(&element, &matched)))
  });

  c.bench_function("calc_parse_and_evaluate", |b| {
    b.iter(|| {
      let expr = faststyle::calc::parse_str(black_box("calc(50% - 10px + 2em)")).unwrap();
      black_box(faststyle::calc::evaluate_as_length(
        &expr,
        &faststyle::calc::CalcLengthContext {
          percentage_base: Some(640.0),
          font_size: 16.0,
          ..Default::default()
        },
      ))
    })
  });
}

criterion_group!(benches, bench_cascade);
criterion_main!(benches);
